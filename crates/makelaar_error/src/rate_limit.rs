//! Error types for rate limiting operations.

/// Error kinds for rate limiting operations.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, derive_more::Display)]
pub enum RateLimitErrorKind {
    /// A limiter was configured with a zero capacity.
    #[display("Rate limiter capacity must be greater than zero, got {}", _0)]
    InvalidCapacity(u32),
    /// The caller cancelled while waiting for a permit.
    #[display("Rate limiter acquisition cancelled")]
    Cancelled,
}

/// Rate limiting error with location tracking.
///
/// # Examples
///
/// ```
/// use makelaar_error::{RateLimitError, RateLimitErrorKind};
///
/// let err = RateLimitError::new(RateLimitErrorKind::InvalidCapacity(0));
/// assert_eq!(err.kind(), &RateLimitErrorKind::InvalidCapacity(0));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rate Limit Error: {} at line {} in {}", kind, line, file)]
pub struct RateLimitError {
    kind: RateLimitErrorKind,
    line: u32,
    file: &'static str,
}

impl RateLimitError {
    /// Create a new rate limiting error with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RateLimitErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Get the error kind.
    pub fn kind(&self) -> &RateLimitErrorKind {
        &self.kind
    }
}

/// Result type for rate limiting operations.
pub type RateLimitResult<T> = std::result::Result<T, RateLimitError>;
