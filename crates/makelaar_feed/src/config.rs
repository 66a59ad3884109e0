//! Feed connection and retry settings.

use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio_retry2::strategy::{ExponentialBackoff, jitter};

/// Connection settings for the listing feed (`[feed]` table).
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedConfig {
    /// Base URL the request paths are resolved against
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Partner API key; usually supplied through `FUNDA_API_KEY`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Transport timeout per request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://partnerapi.funda.nl/".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FeedConfig {
    /// Transport timeout as a duration.
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl std::fmt::Debug for FeedConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

/// Opt-in retry of transient page failures (`[retry]` table).
///
/// Disabled by default: without it any failure aborts the fetch at once.
/// When enabled, a page request failing with a retryable error (408, 429,
/// 5xx, or a transport failure) is re-attempted with exponential backoff
/// and jitter. Quota exhaustion (401) is never retried. Each attempt
/// acquires its own rate limiter permit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Whether transient failures are retried
    #[serde(default)]
    pub enabled: bool,

    /// Delay before the first retry, in milliseconds
    #[serde(default = "default_initial_backoff_ms")]
    pub initial_backoff_ms: u64,

    /// Maximum number of retries per page
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Upper bound for a single backoff delay, in seconds
    #[serde(default = "default_max_delay_secs")]
    pub max_delay_secs: u64,
}

fn default_initial_backoff_ms() -> u64 {
    1000
}

fn default_max_retries() -> usize {
    3
}

fn default_max_delay_secs() -> u64 {
    30
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            initial_backoff_ms: default_initial_backoff_ms(),
            max_retries: default_max_retries(),
            max_delay_secs: default_max_delay_secs(),
        }
    }
}

impl RetryConfig {
    /// An enabled policy with the default backoff parameters.
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Self::default()
        }
    }

    /// Backoff delays between attempts.
    ///
    /// Base 2 doubles the delay per attempt; the factor scales the first
    /// delay to `initial_backoff_ms`.
    pub fn strategy(&self) -> impl Iterator<Item = Duration> + use<> {
        ExponentialBackoff::from_millis(2)
            .factor((self.initial_backoff_ms / 2).max(1))
            .max_delay(Duration::from_secs(self.max_delay_secs))
            .map(jitter)
            .take(self.max_retries)
    }
}
