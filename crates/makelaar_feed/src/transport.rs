//! HTTP transport seam.

use async_trait::async_trait;
use derive_getters::Getters;
use makelaar_error::{ConfigError, FeedError, FeedErrorKind, FeedResult, MakelaarResult};
use reqwest::{Client, Method, Url};
use std::time::Duration;
use tracing::{debug, instrument};

/// Status line and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct TransportResponse {
    /// HTTP status code
    status: u16,
    /// Reason phrase for the status, empty when unknown
    reason: String,
    /// Raw response body
    body: Vec<u8>,
}

impl TransportResponse {
    /// Creates a response from its parts.
    pub fn new(status: u16, reason: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            reason: reason.into(),
            body: body.into(),
        }
    }

    /// Returns true for 2xx statuses.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends a request for a path relative to some base URL.
///
/// Implementations report any completed exchange as `Ok`, whatever its
/// status; `Err` is reserved for exchanges that never completed.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Issue `method` against `path` and collect the full response.
    async fn send(&self, method: Method, path: &str) -> FeedResult<TransportResponse>;
}

/// [`Transport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
}

impl ReqwestTransport {
    /// Create a transport resolving paths against `base_url`.
    ///
    /// A trailing `/` is added to the base URL when missing so relative
    /// paths extend it instead of replacing its last segment.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL does not parse or the HTTP client
    /// cannot be initialized.
    #[instrument(skip_all, fields(base_url = %base_url, timeout_secs = timeout.as_secs()))]
    pub fn new(base_url: &str, timeout: Duration) -> MakelaarResult<Self> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };

        let base_url = Url::parse(&normalized).map_err(|e| {
            ConfigError::new(format!("Invalid feed base URL '{}': {}", normalized, e))
        })?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ConfigError::new(format!("Failed to build HTTP client: {}", e)))?;

        debug!("Created reqwest transport");
        Ok(Self { client, base_url })
    }

    /// Base URL requests are resolved against.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    // The path embeds the API key, so it is never recorded.
    #[instrument(skip(self, path), fields(method = %method))]
    async fn send(&self, method: Method, path: &str) -> FeedResult<TransportResponse> {
        let url = self.base_url.join(path).map_err(|e| {
            FeedError::new(FeedErrorKind::Transport(format!(
                "Invalid request path: {}",
                e
            )))
        })?;

        let response = self
            .client
            .request(method, url)
            .send()
            .await
            .map_err(|e| {
                FeedError::new(FeedErrorKind::Transport(format!(
                    "Request failed: {}",
                    e.without_url()
                )))
            })?;

        let status = response.status();
        let reason = status.canonical_reason().unwrap_or_default().to_string();

        let body = response.bytes().await.map_err(|e| {
            FeedError::new(FeedErrorKind::Transport(format!(
                "Failed to read response body: {}",
                e.without_url()
            )))
        })?;

        debug!(status = status.as_u16(), bytes = body.len(), "Received response");
        Ok(TransportResponse::new(status.as_u16(), reason, body.to_vec()))
    }
}
