//! The rate limiter seam consumed by the feed client.

use async_trait::async_trait;
use makelaar_error::RateLimitResult;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// A throughput gate awaited before every outbound request.
///
/// Implementations must be safe to share across concurrent callers.
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Wait until a request may be issued, then consume the permission.
    ///
    /// # Errors
    ///
    /// Returns [`RateLimitErrorKind::Cancelled`](makelaar_error::RateLimitErrorKind::Cancelled)
    /// if `cancel` fires before a permit is granted.
    async fn acquire(&self, cancel: &CancellationToken) -> RateLimitResult<()>;

    /// Short strategy name used in log fields.
    fn strategy_name(&self) -> &'static str;
}

#[async_trait]
impl<T: RateLimiter + ?Sized> RateLimiter for Arc<T> {
    async fn acquire(&self, cancel: &CancellationToken) -> RateLimitResult<()> {
        (**self).acquire(cancel).await
    }

    fn strategy_name(&self) -> &'static str {
        (**self).strategy_name()
    }
}
