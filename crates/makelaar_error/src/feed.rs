//! Listing feed error types and retry classification.

use crate::{RateLimitError, RateLimitErrorKind};

/// Listing feed error conditions.
///
/// Every variant is terminal for a paginated fetch: the fetch is abandoned
/// and pages retrieved so far are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum FeedErrorKind {
    /// The feed answered 401, which it uses to signal an exhausted usage quota
    #[display(
        "Received 401 Unauthorized from the listing feed. The usage limit has been exceeded. Please try again later."
    )]
    QuotaExceeded,
    /// Any other non-success HTTP status
    #[display("Listing feed request failed: {} {}", status, reason)]
    RequestFailed {
        /// HTTP status code
        status: u16,
        /// Reason phrase reported for the status
        reason: String,
    },
    /// Response body did not match the expected page shape
    #[display("Failed to deserialize listing feed response: {}", _0)]
    MalformedResponse(String),
    /// Cooperative cancellation was observed
    #[display("Listing feed fetch cancelled")]
    Cancelled,
    /// The transport could not complete the request at all
    #[display("Listing feed transport failure: {}", _0)]
    Transport(String),
    /// The rate limiter refused to issue a permit
    #[display("Rate limiter failure: {}", _0)]
    Limiter(String),
}

impl FeedErrorKind {
    /// Check if this error type may succeed when retried.
    ///
    /// Quota exhaustion is never retryable; the feed only recovers after the
    /// quota window resets.
    pub fn is_retryable(&self) -> bool {
        match self {
            FeedErrorKind::RequestFailed { status, .. } => {
                matches!(*status, 408 | 429 | 500 | 502 | 503 | 504)
            }
            FeedErrorKind::Transport(_) => true,
            _ => false,
        }
    }
}

/// Listing feed error with source location tracking.
///
/// # Examples
///
/// ```
/// use makelaar_error::{FeedError, FeedErrorKind};
///
/// let err = FeedError::new(FeedErrorKind::RequestFailed {
///     status: 500,
///     reason: "Internal Server Error".to_string(),
/// });
/// assert!(format!("{}", err).contains("500 Internal Server Error"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Feed Error: {} at line {} in {}", kind, line, file)]
pub struct FeedError {
    kind: FeedErrorKind,
    line: u32,
    file: &'static str,
}

impl FeedError {
    /// Create a new FeedError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: FeedErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &FeedErrorKind {
        &self.kind
    }

    /// Returns true when the feed signalled an exhausted usage quota.
    pub fn is_quota_exceeded(&self) -> bool {
        self.kind == FeedErrorKind::QuotaExceeded
    }
}

impl From<RateLimitError> for FeedError {
    #[track_caller]
    fn from(err: RateLimitError) -> Self {
        match err.kind() {
            RateLimitErrorKind::Cancelled => Self::new(FeedErrorKind::Cancelled),
            other => Self::new(FeedErrorKind::Limiter(other.to_string())),
        }
    }
}

/// Trait for errors that support retry logic.
///
/// # Examples
///
/// ```
/// use makelaar_error::{FeedError, FeedErrorKind, RetryableError};
///
/// let unavailable = FeedError::new(FeedErrorKind::RequestFailed {
///     status: 503,
///     reason: "Service Unavailable".to_string(),
/// });
/// assert!(unavailable.is_retryable());
///
/// let quota = FeedError::new(FeedErrorKind::QuotaExceeded);
/// assert!(!quota.is_retryable());
/// ```
pub trait RetryableError {
    /// Returns true if this error should trigger a retry.
    ///
    /// Transient errors like 503 (service unavailable) or transport failures
    /// should return true. Permanent errors like 401 (quota exhausted) or
    /// a malformed body should return false.
    fn is_retryable(&self) -> bool;
}

impl RetryableError for FeedError {
    fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }
}

/// Result type for listing feed operations.
pub type FeedResult<T> = std::result::Result<T, FeedError>;
