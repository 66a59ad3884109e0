//! Configuration structures for rate limiting.
//!
//! The `[rate_limit]` table of `makelaar.toml` selects a strategy and its
//! parameters:
//!
//! ```toml
//! [rate_limit]
//! strategy = "token_bucket"   # or "fixed_delay", "quota"
//! requests_per_minute = 100
//! delay_ms = 600              # fixed_delay only
//! ```

use crate::{FixedDelayRateLimiter, QuotaRateLimiter, RateLimiter, TokenBucketRateLimiter};
use makelaar_error::RateLimitResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, instrument};

/// Available throttling strategies.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum RateLimitStrategy {
    /// Token bucket, empty at start, `requests_per_minute` capacity
    #[default]
    TokenBucket,
    /// Constant `delay_ms` pause before every request
    FixedDelay,
    /// GCRA quota of `requests_per_minute`, full burst up front
    Quota,
}

/// Rate limit settings.
///
/// # Example
///
/// ```
/// use makelaar_rate_limit::{RateLimitConfig, RateLimitStrategy};
///
/// let config = RateLimitConfig::default();
/// assert_eq!(config.strategy, RateLimitStrategy::TokenBucket);
/// assert_eq!(config.requests_per_minute, 100);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Which limiter to build
    #[serde(default)]
    pub strategy: RateLimitStrategy,

    /// Permits per minute for `token_bucket` and `quota`
    #[serde(default = "default_requests_per_minute")]
    pub requests_per_minute: u32,

    /// Pause per request for `fixed_delay`, in milliseconds
    #[serde(default = "default_delay_ms")]
    pub delay_ms: u64,
}

fn default_requests_per_minute() -> u32 {
    100
}

fn default_delay_ms() -> u64 {
    600
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            strategy: RateLimitStrategy::default(),
            requests_per_minute: default_requests_per_minute(),
            delay_ms: default_delay_ms(),
        }
    }
}

impl RateLimitConfig {
    /// Build the configured limiter, ready to be shared between clients.
    ///
    /// # Errors
    ///
    /// Returns an error if a per-minute strategy is configured with
    /// `requests_per_minute = 0`.
    #[instrument(skip(self), fields(strategy = %self.strategy))]
    pub fn build(&self) -> RateLimitResult<Arc<dyn RateLimiter>> {
        debug!(
            requests_per_minute = self.requests_per_minute,
            delay_ms = self.delay_ms,
            "Building rate limiter"
        );

        let limiter: Arc<dyn RateLimiter> = match self.strategy {
            RateLimitStrategy::TokenBucket => {
                Arc::new(TokenBucketRateLimiter::per_minute(self.requests_per_minute)?)
            }
            RateLimitStrategy::FixedDelay => Arc::new(FixedDelayRateLimiter::new(
                Duration::from_millis(self.delay_ms),
            )),
            RateLimitStrategy::Quota => {
                Arc::new(QuotaRateLimiter::per_minute(self.requests_per_minute)?)
            }
        };

        Ok(limiter)
    }
}
