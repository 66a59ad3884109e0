//! Makelaar - rank real-estate agents by listing count
//!
//! Makelaar drains a paginated listing feed under a shared rate limit and
//! reports which agents hold the most listings for each configured search.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use makelaar::{FeedClient, FeedQuery, MakelaarConfig, top_by_object_count};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = MakelaarConfig::load()?;
//!     let limiter = config.rate_limit.build()?;
//!     let client = FeedClient::from_config(&config.feed, &config.retry, limiter)?;
//!
//!     let query = FeedQuery::builder().path("/amsterdam/").build()?;
//!     let listings = client.fetch_all(&query, &CancellationToken::new()).await?;
//!
//!     for stat in top_by_object_count(&listings, 10) {
//!         println!("{} {}", stat.agent_name(), stat.object_count());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! Makelaar is organized as a workspace with focused crates:
//!
//! - `makelaar_error` - Error types
//! - `makelaar_core` - Query, page and listing types
//! - `makelaar_rate_limit` - Token bucket, fixed delay and quota limiters
//! - `makelaar_feed` - Paginated feed client and HTTP transport
//! - `makelaar_stats` - Per-agent aggregation
//!
//! This crate (`makelaar`) re-exports everything for convenience and adds
//! configuration loading and report rendering for the `makelaar` binary.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod report;

pub use config::MakelaarConfig;
pub use report::{
    QueryReport, QuerySpec, ReportConfig, build_report, render_table, run_reports, truncate_name,
};

// Re-export core crates
pub use makelaar_core::*;
pub use makelaar_error::*;
pub use makelaar_feed::*;
pub use makelaar_rate_limit::*;
pub use makelaar_stats::*;
