//! Configuration error types.

/// Configuration error with source location.
///
/// Raised while loading `makelaar.toml` layers or when a required setting,
/// such as the feed API key, is absent.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Configuration Error: {} at line {} in {}", message, line, file)]
pub struct ConfigError {
    /// Error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl ConfigError {
    /// Create a new ConfigError with the given message at the current location.
    ///
    /// # Examples
    ///
    /// ```
    /// use makelaar_error::ConfigError;
    ///
    /// let err = ConfigError::new("Failed to parse makelaar.toml");
    /// assert!(err.message.contains("makelaar.toml"));
    /// ```
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }

    /// Error for a required setting that no configuration layer provided.
    ///
    /// # Examples
    ///
    /// ```
    /// use makelaar_error::ConfigError;
    ///
    /// let err = ConfigError::missing("feed.api_key", "FUNDA_API_KEY");
    /// assert!(err.message.contains("FUNDA_API_KEY"));
    /// ```
    #[track_caller]
    pub fn missing(key: &str, env_var: &str) -> Self {
        Self::new(format!(
            "Missing required setting '{}'. Set {} in the environment or a .env file",
            key, env_var
        ))
    }
}
