//! Paginated fetch loop.

use crate::{FeedConfig, ReqwestTransport, RetryConfig, Transport, TransportResponse, request_path};
use makelaar_core::{FeedPage, FeedQuery, Listing};
use makelaar_error::{
    ConfigError, FeedError, FeedErrorKind, FeedResult, MakelaarResult, RetryableError,
};
use makelaar_rate_limit::RateLimiter;
use reqwest::Method;
use std::sync::Arc;
use tokio_retry2::{Retry, RetryError};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, instrument, warn};

/// Client that drains every page of a feed query.
///
/// Cloning is cheap; clones share the transport and the rate limiter.
///
/// # Example
///
/// ```rust,no_run
/// use makelaar_core::FeedQuery;
/// use makelaar_feed::{FeedClient, ReqwestTransport};
/// use makelaar_rate_limit::TokenBucketRateLimiter;
/// use std::sync::Arc;
/// use std::time::Duration;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = ReqwestTransport::new("http://partnerapi.funda.nl/", Duration::from_secs(30))?;
/// let limiter = TokenBucketRateLimiter::per_minute(100)?;
/// let client = FeedClient::new(Arc::new(transport), Arc::new(limiter), "my-api-key");
///
/// let query = FeedQuery::builder().path("/amsterdam/").build()?;
/// let listings = client.fetch_all(&query, &CancellationToken::new()).await?;
/// println!("fetched {} listings", listings.len());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct FeedClient {
    transport: Arc<dyn Transport>,
    limiter: Arc<dyn RateLimiter>,
    api_key: String,
    retry: Option<RetryConfig>,
}

impl FeedClient {
    /// Create a client without transient-failure retries.
    pub fn new(
        transport: Arc<dyn Transport>,
        limiter: Arc<dyn RateLimiter>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            limiter,
            api_key: api_key.into(),
            retry: None,
        }
    }

    /// Retry transient page failures according to `retry`.
    ///
    /// A policy with `enabled = false` leaves retries off.
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry.enabled.then_some(retry);
        self
    }

    /// Build a reqwest-backed client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the transport
    /// cannot be created.
    #[instrument(skip_all, fields(strategy = limiter.strategy_name()))]
    pub fn from_config(
        feed: &FeedConfig,
        retry: &RetryConfig,
        limiter: Arc<dyn RateLimiter>,
    ) -> MakelaarResult<Self> {
        let api_key = feed
            .api_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| ConfigError::missing("feed.api_key", "FUNDA_API_KEY"))?;

        let transport = ReqwestTransport::new(&feed.base_url, feed.timeout())?;
        debug!(base_url = %transport.base_url(), retry = retry.enabled, "Created feed client");

        Ok(Self::new(Arc::new(transport), limiter, api_key).with_retry(retry.clone()))
    }

    /// Fetch every page of `query`, in page order.
    ///
    /// Pagination starts at page 1 and advances one page at a time until
    /// the page count declared by the most recent response is reached. One
    /// rate limiter permit is acquired before every request.
    ///
    /// # Errors
    ///
    /// Any failure aborts the whole fetch and discards pages already read:
    /// - [`FeedErrorKind::QuotaExceeded`] when the feed answers 401
    /// - [`FeedErrorKind::RequestFailed`] for any other non-success status
    /// - [`FeedErrorKind::MalformedResponse`] when a body is not a feed page
    /// - [`FeedErrorKind::Cancelled`] when `cancel` fires
    /// - [`FeedErrorKind::Transport`] when a request cannot complete
    #[instrument(
        skip(self, cancel),
        fields(path = %query.path(), search_type = %query.search_type(), page_size = query.page_size())
    )]
    pub async fn fetch_all(
        &self,
        query: &FeedQuery,
        cancel: &CancellationToken,
    ) -> FeedResult<Vec<Listing>> {
        let mut listings = Vec::new();
        let mut current_page: u32 = 1;

        loop {
            let page = self.fetch_page(query, current_page, cancel).await?;
            let total_pages = *page.paging().total_pages();

            debug!(
                page = current_page,
                total_pages,
                count = page.len(),
                "Fetched feed page"
            );
            listings.extend(page.into_listings());

            if current_page >= total_pages {
                break;
            }
            current_page += 1;
        }

        info!(pages = current_page, count = listings.len(), "Fetched all listings");
        Ok(listings)
    }

    /// Fetch a single page of `query`, retrying transient failures when enabled.
    #[instrument(skip(self, query, cancel))]
    pub async fn fetch_page(
        &self,
        query: &FeedQuery,
        page: u32,
        cancel: &CancellationToken,
    ) -> FeedResult<FeedPage> {
        let Some(retry) = &self.retry else {
            return self.attempt_page(query, page, cancel).await;
        };

        let attempts = Retry::spawn(retry.strategy(), move || async move {
            match self.attempt_page(query, page, cancel).await {
                Ok(page) => Ok(page),
                Err(e) if e.is_retryable() => {
                    warn!(error = %e, "Transient feed error, will retry");
                    Err(RetryError::Transient {
                        err: e,
                        retry_after: None,
                    })
                }
                Err(e) => {
                    debug!(error = %e, "Permanent feed error, failing immediately");
                    Err(RetryError::Permanent(e))
                }
            }
        });

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(FeedError::new(FeedErrorKind::Cancelled)),
            result = attempts => result,
        }
    }

    /// One permit, one request, one classification.
    async fn attempt_page(
        &self,
        query: &FeedQuery,
        page: u32,
        cancel: &CancellationToken,
    ) -> FeedResult<FeedPage> {
        self.limiter.acquire(cancel).await?;

        let path = request_path(&self.api_key, query, page);
        let response = tokio::select! {
            biased;
            _ = cancel.cancelled() => return Err(FeedError::new(FeedErrorKind::Cancelled)),
            response = self.transport.send(Method::GET, &path) => response?,
        };

        parse_page(response)
    }
}

impl std::fmt::Debug for FeedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FeedClient")
            .field("limiter", &self.limiter.strategy_name())
            .field("api_key", &"<redacted>")
            .field("retry", &self.retry)
            .finish()
    }
}

/// Classify a completed exchange.
fn parse_page(response: TransportResponse) -> FeedResult<FeedPage> {
    match *response.status() {
        // The feed reports an exhausted usage quota as 401 rather than 429.
        401 => Err(FeedError::new(FeedErrorKind::QuotaExceeded)),
        status if !response.is_success() => Err(FeedError::new(FeedErrorKind::RequestFailed {
            status,
            reason: response.reason().clone(),
        })),
        _ => serde_json::from_slice(response.body())
            .map_err(|e| FeedError::new(FeedErrorKind::MalformedResponse(e.to_string()))),
    }
}
