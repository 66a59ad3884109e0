//! Constant-pause limiter.

use crate::RateLimiter;
use async_trait::async_trait;
use makelaar_error::{RateLimitError, RateLimitErrorKind, RateLimitResult};
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::instrument;

/// Sleeps a fixed duration before every request.
///
/// There is no token economy: each caller pauses independently, so
/// concurrent callers are not spaced relative to one another. A zero delay
/// disables throttling entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedDelayRateLimiter {
    delay: Duration,
}

impl FixedDelayRateLimiter {
    /// Create a limiter pausing `delay` per acquisition.
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The configured pause.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl RateLimiter for FixedDelayRateLimiter {
    #[instrument(skip(self, cancel), fields(delay_ms = self.delay.as_millis() as u64))]
    async fn acquire(&self, cancel: &CancellationToken) -> RateLimitResult<()> {
        if self.delay.is_zero() {
            return Ok(());
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RateLimitError::new(RateLimitErrorKind::Cancelled)),
            _ = tokio::time::sleep(self.delay) => Ok(()),
        }
    }

    fn strategy_name(&self) -> &'static str {
        "fixed_delay"
    }
}
