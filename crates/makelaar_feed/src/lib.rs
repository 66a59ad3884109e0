//! Paginated, rate-limited client for the listing feed.
//!
//! [`FeedClient::fetch_all`] turns a multi-page feed into one in-memory
//! collection. Before every request it awaits the shared
//! [`RateLimiter`](makelaar_rate_limit::RateLimiter); requests go through
//! an injected [`Transport`] so the HTTP stack can be replaced in tests.
//!
//! Every failure is terminal for the fetch and no partial results are
//! returned. Transient failures may optionally be retried per page, see
//! [`RetryConfig`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
mod transport;
mod url;

pub use client::FeedClient;
pub use config::{FeedConfig, RetryConfig};
pub use reqwest::Method;
pub use transport::{ReqwestTransport, Transport, TransportResponse};
pub use url::request_path;
