//! Shop token entity: an API credential scoped to a single shop.

use chrono::{DateTime, Utc};

/// A shop API token with its metadata.
///
/// The token string itself is the identity: the panel displays it and
/// shops send it verbatim with every request, so it is stored raw.
#[derive(Debug, Clone)]
pub struct ShopToken {
    pub token: String,
    pub shop_id: String,
    pub description: String,
    /// Expiry as epoch seconds, truncated to whole minutes.
    pub expires_at: i64,
    pub created_at: DateTime<Utc>,
}

impl ShopToken {
    /// Returns true once the expiry time has passed.
    pub fn is_expired(&self, now: i64) -> bool {
        self.expires_at <= now
    }
}

/// Input data for creating or replacing a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewShopToken {
    pub token: String,
    pub shop_id: String,
    pub description: String,
    pub expires_at: i64,
}

/// One row of the panel's token listing: the token plus usage counts.
#[derive(Debug, Clone)]
pub struct TokenOverview {
    pub token: ShopToken,
    pub items_count: i64,
    pub images_count: i64,
}

/// Truncates an epoch timestamp down to the nearest whole minute.
///
/// The picker script already sends minute-aligned values; applying the
/// same truncation here keeps the stored granularity independent of the
/// client.
pub fn truncate_to_minute(epoch_seconds: i64) -> i64 {
    epoch_seconds - epoch_seconds.rem_euclid(60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_to_minute() {
        assert_eq!(truncate_to_minute(0), 0);
        assert_eq!(truncate_to_minute(59), 0);
        assert_eq!(truncate_to_minute(60), 60);
        assert_eq!(truncate_to_minute(1_700_000_035), 1_700_000_035 - 35);
    }

    #[test]
    fn test_truncate_negative_rounds_down() {
        // Pre-epoch timestamps still round towards minus infinity.
        assert_eq!(truncate_to_minute(-1), -60);
        assert_eq!(truncate_to_minute(-60), -60);
    }

    #[test]
    fn test_is_expired() {
        let token = ShopToken {
            token: "abc".to_string(),
            shop_id: "1".to_string(),
            description: String::new(),
            expires_at: 1000,
            created_at: Utc::now(),
        };

        assert!(!token.is_expired(999));
        assert!(token.is_expired(1000));
        assert!(token.is_expired(1001));
    }
}
