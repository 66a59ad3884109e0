//! Token bucket limiter with a per-minute capacity.
//!
//! The bucket holds at most `capacity` tokens and refills continuously at
//! `capacity / 60_000` tokens per millisecond. It starts empty, so the very
//! first caller waits for one token to accrue.
//!
//! Refill and debit happen under a mutex; waiting happens after the lock is
//! released so concurrent callers are never serialized behind a sleeper. A
//! woken caller re-validates availability instead of assuming success, which
//! resolves races between waiters that computed overlapping wait times.

use crate::RateLimiter;
use async_trait::async_trait;
use makelaar_error::{RateLimitError, RateLimitErrorKind, RateLimitResult};
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, trace};

const WINDOW_MS: f64 = 60_000.0;

#[derive(Debug)]
struct BucketState {
    available_tokens: f64,
    last_refill: Instant,
}

/// Read-only view of a bucket's state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BucketSnapshot {
    /// Tokens currently in the bucket
    pub available_tokens: f64,
    /// Instant of the most recent refill
    pub last_refill: Instant,
}

/// Outcome of one locked refill-and-debit attempt.
enum Attempt {
    Granted,
    Wait(f64),
}

/// Token bucket allowing at most `capacity` requests per minute.
///
/// # Example
///
/// ```rust,no_run
/// use makelaar_rate_limit::{RateLimiter, TokenBucketRateLimiter};
/// use tokio_util::sync::CancellationToken;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let limiter = TokenBucketRateLimiter::per_minute(100)?;
/// let cancel = CancellationToken::new();
///
/// limiter.acquire(&cancel).await?;
/// // issue request...
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TokenBucketRateLimiter {
    state: Mutex<BucketState>,
    capacity: f64,
    refill_rate_per_ms: f64,
}

impl TokenBucketRateLimiter {
    /// Create an empty bucket granting at most `max_per_minute` permits per minute.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::InvalidCapacity`] when `max_per_minute` is zero.
    #[instrument]
    pub fn per_minute(max_per_minute: u32) -> RateLimitResult<Self> {
        if max_per_minute == 0 {
            return Err(RateLimitError::new(RateLimitErrorKind::InvalidCapacity(
                max_per_minute,
            )));
        }

        let capacity = f64::from(max_per_minute);
        debug!(capacity, "Creating token bucket rate limiter");

        Ok(Self {
            state: Mutex::new(BucketState {
                available_tokens: 0.0,
                last_refill: Instant::now(),
            }),
            capacity,
            refill_rate_per_ms: capacity / WINDOW_MS,
        })
    }

    /// Maximum number of tokens the bucket holds.
    pub fn capacity(&self) -> f64 {
        self.capacity
    }

    /// Tokens added per elapsed millisecond.
    pub fn refill_rate_per_ms(&self) -> f64 {
        self.refill_rate_per_ms
    }

    /// Current bucket state, without refilling.
    pub async fn snapshot(&self) -> BucketSnapshot {
        let state = self.state.lock().await;
        BucketSnapshot {
            available_tokens: state.available_tokens,
            last_refill: state.last_refill,
        }
    }

    /// Refill, then debit one token or report how many milliseconds to wait.
    async fn try_acquire(&self) -> Attempt {
        let mut state = self.state.lock().await;

        let now = Instant::now();
        let elapsed_ms = now.saturating_duration_since(state.last_refill).as_secs_f64() * 1000.0;
        if elapsed_ms > 0.0 {
            state.available_tokens =
                (state.available_tokens + elapsed_ms * self.refill_rate_per_ms).min(self.capacity);
            state.last_refill = now;
        }

        if state.available_tokens >= 1.0 {
            state.available_tokens -= 1.0;
            return Attempt::Granted;
        }

        let needed_ms = (1.0 - state.available_tokens) / self.refill_rate_per_ms;
        Attempt::Wait(needed_ms)
    }
}

#[async_trait]
impl RateLimiter for TokenBucketRateLimiter {
    #[instrument(skip(self, cancel), fields(capacity = self.capacity))]
    async fn acquire(&self, cancel: &CancellationToken) -> RateLimitResult<()> {
        loop {
            if cancel.is_cancelled() {
                return Err(RateLimitError::new(RateLimitErrorKind::Cancelled));
            }

            let needed_ms = match self.try_acquire().await {
                Attempt::Granted => {
                    trace!("Token granted");
                    return Ok(());
                }
                Attempt::Wait(needed_ms) => needed_ms,
            };

            if needed_ms <= 0.0 {
                tokio::task::yield_now().await;
                continue;
            }

            // Whole milliseconds only; a sub-tick sleep would spin.
            let wait = Duration::from_millis(needed_ms.ceil() as u64);
            debug!(wait_ms = wait.as_millis() as u64, "Bucket empty, waiting");

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    return Err(RateLimitError::new(RateLimitErrorKind::Cancelled));
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }

    fn strategy_name(&self) -> &'static str {
        "token_bucket"
    }
}
