//! Request throttling for the listing feed.
//!
//! Every limiter implements the [`RateLimiter`] trait: callers await
//! [`RateLimiter::acquire`] before each request, and one limiter can be shared
//! behind an `Arc` by any number of clients and concurrent fetches.
//!
//! ## Strategies
//!
//! - [`TokenBucketRateLimiter`] - at most N permits per minute, bucket starts empty
//! - [`FixedDelayRateLimiter`] - constant pause before every request
//! - [`QuotaRateLimiter`] - GCRA quota via `governor`, full burst available up front
//!
//! [`RateLimitConfig`] selects and builds one of them from configuration.

mod config;
mod fixed_delay;
mod limiter;
mod quota;
mod token_bucket;

pub use config::{RateLimitConfig, RateLimitStrategy};
pub use fixed_delay::FixedDelayRateLimiter;
pub use limiter::RateLimiter;
pub use quota::QuotaRateLimiter;
pub use token_bucket::{BucketSnapshot, TokenBucketRateLimiter};
