//! Global flood limiter for mutating shop-API endpoints.

use governor::{Quota, RateLimiter};
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use std::num::NonZeroU32;

/// In-process token bucket shared by all clients.
///
/// A single global bucket, not per-IP: uploads arrive from shop backends
/// behind NAT, so the limiter protects disk and database throughput
/// rather than fairness. Exhaustion is answered with the API's
/// `flood_limit` envelope, not a 429.
pub struct FloodLimiter {
    limiter: RateLimiter<NotKeyed, InMemoryState, DefaultClock>,
}

impl FloodLimiter {
    /// Creates a limiter refilling `per_second` permits with the given
    /// burst capacity. Zero values are rejected by config validation;
    /// they are clamped to 1 here to keep the constructor total.
    pub fn new(per_second: u32, burst: u32) -> Self {
        let per_second = NonZeroU32::new(per_second.max(1)).expect("clamped above");
        let burst = NonZeroU32::new(burst.max(1)).expect("clamped above");

        Self {
            limiter: RateLimiter::direct(Quota::per_second(per_second).allow_burst(burst)),
        }
    }

    /// Takes one permit; false when the bucket is empty.
    pub fn allow(&self) -> bool {
        self.limiter.check().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_then_exhaustion() {
        let limiter = FloodLimiter::new(1, 3);

        assert!(limiter.allow());
        assert!(limiter.allow());
        assert!(limiter.allow());
        // Burst spent, refill is 1/s.
        assert!(!limiter.allow());
    }

    #[test]
    fn test_zero_config_is_clamped() {
        let limiter = FloodLimiter::new(0, 0);
        assert!(limiter.allow());
    }
}
