//! Top-level error wrapper types.

use crate::{BuilderError, ConfigError, FeedError, JsonError, RateLimitError};

/// Every error condition the makelaar crates can surface.
///
/// # Examples
///
/// ```
/// use makelaar_error::{ConfigError, MakelaarError};
///
/// let config_err = ConfigError::new("FUNDA_API_KEY not set");
/// let err: MakelaarError = config_err.into();
/// assert!(format!("{}", err).contains("Configuration Error"));
/// ```
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MakelaarErrorKind {
    /// Listing feed error
    #[from(FeedError)]
    Feed(FeedError),
    /// Rate limiter error
    #[from(RateLimitError)]
    RateLimit(RateLimitError),
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Builder error
    #[from(BuilderError)]
    Builder(BuilderError),
    /// JSON serialization/deserialization error
    #[from(JsonError)]
    Json(JsonError),
}

/// Makelaar error with kind discrimination.
///
/// # Examples
///
/// ```
/// use makelaar_error::{FeedError, FeedErrorKind, MakelaarErrorKind, MakelaarResult};
///
/// fn might_fail() -> MakelaarResult<()> {
///     Err(FeedError::new(FeedErrorKind::QuotaExceeded))?
/// }
///
/// let err = might_fail().unwrap_err();
/// assert!(matches!(err.kind(), MakelaarErrorKind::Feed(_)));
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Makelaar Error: {}", _0)]
pub struct MakelaarError(Box<MakelaarErrorKind>);

impl MakelaarError {
    /// Create a new error from a kind.
    pub fn new(kind: MakelaarErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MakelaarErrorKind {
        &self.0
    }

    /// Returns true when the listing feed reported an exhausted usage quota.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self.kind(), MakelaarErrorKind::Feed(e) if e.is_quota_exceeded())
    }
}

// Generic From implementation for any type that converts to MakelaarErrorKind
impl<T> From<T> for MakelaarError
where
    T: Into<MakelaarErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for makelaar operations.
pub type MakelaarResult<T> = std::result::Result<T, MakelaarError>;
