//! Quota limiter backed by governor's GCRA implementation.

use crate::RateLimiter;
use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter as GovernorRateLimiter};
use makelaar_error::{RateLimitError, RateLimitErrorKind, RateLimitResult};
use std::num::NonZeroU32;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

// Type alias for our direct rate limiter
type DirectRateLimiter = GovernorRateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Per-minute quota enforced with the Generic Cell Rate Algorithm.
///
/// Unlike [`TokenBucketRateLimiter`](crate::TokenBucketRateLimiter), the full
/// per-minute burst is available immediately; after that, permits are
/// released evenly across the minute.
///
/// Waiting is driven by governor's own clock, so this limiter does not follow
/// a paused tokio clock.
pub struct QuotaRateLimiter {
    limiter: DirectRateLimiter,
    max_per_minute: NonZeroU32,
}

impl QuotaRateLimiter {
    /// Create a quota allowing `max_per_minute` requests per minute.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::InvalidCapacity`] when `max_per_minute` is zero.
    #[instrument]
    pub fn per_minute(max_per_minute: u32) -> RateLimitResult<Self> {
        let max_per_minute = NonZeroU32::new(max_per_minute).ok_or_else(|| {
            RateLimitError::new(RateLimitErrorKind::InvalidCapacity(max_per_minute))
        })?;
        debug!(max_per_minute = max_per_minute.get(), "Creating GCRA quota rate limiter");

        Ok(Self {
            limiter: GovernorRateLimiter::direct(Quota::per_minute(max_per_minute)),
            max_per_minute,
        })
    }

    /// Configured requests per minute.
    pub fn max_per_minute(&self) -> u32 {
        self.max_per_minute.get()
    }
}

impl std::fmt::Debug for QuotaRateLimiter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("QuotaRateLimiter")
            .field("max_per_minute", &self.max_per_minute)
            .finish()
    }
}

#[async_trait]
impl RateLimiter for QuotaRateLimiter {
    #[instrument(skip(self, cancel), fields(max_per_minute = self.max_per_minute.get()))]
    async fn acquire(&self, cancel: &CancellationToken) -> RateLimitResult<()> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RateLimitError::new(RateLimitErrorKind::Cancelled)),
            _ = self.limiter.until_ready() => Ok(()),
        }
    }

    fn strategy_name(&self) -> &'static str {
        "quota"
    }
}
