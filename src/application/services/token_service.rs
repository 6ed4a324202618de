//! Token management: the panel's create/edit/delete semantics.

use chrono::Utc;
use rand::Rng;
use rand::distr::Alphanumeric;
use std::sync::Arc;

use crate::domain::entities::{NewShopToken, TokenOverview, truncate_to_minute};
use crate::domain::repositories::TokenRepository;
use crate::error::AppError;

/// Length of generated token values.
const TOKEN_LENGTH: usize = 12;

/// Exclusive upper bound for generated numeric shop ids.
const SHOP_ID_RANGE: u64 = 10_000;

/// Outcome of a panel token mutation.
///
/// `Invalid` covers every business rejection the panel answers with the
/// literal `invalid_request` body; hard failures stay in `AppError`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOutcome {
    Applied,
    Invalid,
}

/// Service implementing the tokens page operations.
pub struct TokenService {
    tokens: Arc<dyn TokenRepository>,
}

impl TokenService {
    /// Creates a new token service.
    pub fn new(tokens: Arc<dyn TokenRepository>) -> Self {
        Self { tokens }
    }

    /// Creates a token from the panel's raw form fields.
    ///
    /// Invalid when token or shop id is empty, either is already in use,
    /// or `exp_time` does not parse as epoch seconds. The stored expiry
    /// is truncated down to whole minutes.
    pub async fn create(
        &self,
        token: &str,
        shop_id: &str,
        description: &str,
        exp_time: &str,
    ) -> Result<PanelOutcome, AppError> {
        if token.is_empty() || shop_id.is_empty() {
            return Ok(PanelOutcome::Invalid);
        }

        let Ok(expires_at) = exp_time.parse::<i64>() else {
            return Ok(PanelOutcome::Invalid);
        };

        if self.tokens.exists(token).await? {
            return Ok(PanelOutcome::Invalid);
        }
        if self.tokens.shop_id_owner(shop_id).await?.is_some() {
            return Ok(PanelOutcome::Invalid);
        }

        let new_token = NewShopToken {
            token: token.to_string(),
            shop_id: shop_id.to_string(),
            description: description.to_string(),
            expires_at: truncate_to_minute(expires_at),
        };

        // Two panel tabs can race the uniqueness checks; the constraint
        // turns the loser into a plain invalid_request.
        match self.tokens.insert(&new_token).await {
            Ok(()) => Ok(PanelOutcome::Applied),
            Err(e) if e.is_conflict() => Ok(PanelOutcome::Invalid),
            Err(e) => Err(e),
        }
    }

    /// Edits an existing token from the panel's per-row form fields.
    ///
    /// The token must exist; a shop id already owned by a *different*
    /// token is invalid (re-submitting a token's own shop id is fine).
    pub async fn edit(
        &self,
        token: &str,
        shop_id: &str,
        description: &str,
        exp_time: &str,
    ) -> Result<PanelOutcome, AppError> {
        if token.is_empty() || shop_id.is_empty() {
            return Ok(PanelOutcome::Invalid);
        }

        let Ok(expires_at) = exp_time.parse::<i64>() else {
            return Ok(PanelOutcome::Invalid);
        };

        if !self.tokens.exists(token).await? {
            return Ok(PanelOutcome::Invalid);
        }

        if let Some(owner) = self.tokens.shop_id_owner(shop_id).await? {
            if owner != token {
                return Ok(PanelOutcome::Invalid);
            }
        }

        let updated = NewShopToken {
            token: token.to_string(),
            shop_id: shop_id.to_string(),
            description: description.to_string(),
            expires_at: truncate_to_minute(expires_at),
        };

        match self.tokens.update(&updated).await {
            Ok(()) => Ok(PanelOutcome::Applied),
            Err(e) if e.is_conflict() => Ok(PanelOutcome::Invalid),
            Err(e) => Err(e),
        }
    }

    /// Deletes a token, returning the image ids it owned so the caller
    /// can remove the files. Deleting an unknown token is not an error;
    /// the panel answers `ok` either way.
    pub async fn delete(&self, token: &str) -> Result<Vec<String>, AppError> {
        Ok(self.tokens.delete(token).await?.unwrap_or_default())
    }

    /// Returns true when the token exists and has not expired.
    pub async fn is_live(&self, token: &str) -> Result<bool, AppError> {
        let now = Utc::now().timestamp();
        Ok(self
            .tokens
            .find(token)
            .await?
            .is_some_and(|t| !t.is_expired(now)))
    }

    /// Lists all tokens with usage counts for the panel page.
    pub async fn list_overview(&self) -> Result<Vec<TokenOverview>, AppError> {
        self.tokens.list_overview().await
    }

    /// Picks a random token value not yet in use, for prefilling the
    /// create form.
    pub async fn suggest_token(&self) -> Result<String, AppError> {
        loop {
            let candidate = random_token();
            if !self.tokens.exists(&candidate).await? {
                return Ok(candidate);
            }
        }
    }

    /// Picks a random numeric shop id not yet in use.
    pub async fn suggest_shop_id(&self) -> Result<String, AppError> {
        loop {
            let candidate = rand::rng().random_range(0..SHOP_ID_RANGE).to_string();
            if self.tokens.shop_id_owner(&candidate).await?.is_none() {
                return Ok(candidate);
            }
        }
    }
}

/// Generates a random alphanumeric token value.
fn random_token() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(TOKEN_LENGTH)
        .map(char::from)
        .collect()
}
