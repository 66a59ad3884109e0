//! Error types for the makelaar workspace.
//!
//! This crate provides the foundation error types used by the feed client,
//! the rate limiters and the command-line front end.
//!
//! # Error Hierarchy
//!
//! All errors follow the `ErrorKind` + wrapper struct pattern:
//! - `*ErrorKind` enum defines specific error conditions
//! - `*Error` struct wraps the kind with source location tracking
//! - All errors use `#[track_caller]` for automatic location capture
//!
//! # Examples
//!
//! ```
//! use makelaar_error::{FeedError, FeedErrorKind, MakelaarResult};
//!
//! fn fetch_listings() -> MakelaarResult<Vec<String>> {
//!     Err(FeedError::new(FeedErrorKind::QuotaExceeded))?
//! }
//!
//! match fetch_listings() {
//!     Ok(listings) => println!("Got {} listings", listings.len()),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod builder;
mod config;
mod error;
mod feed;
mod json;
mod rate_limit;

pub use builder::{BuilderError, BuilderErrorKind};
pub use config::ConfigError;
pub use error::{MakelaarError, MakelaarErrorKind, MakelaarResult};
pub use feed::{FeedError, FeedErrorKind, FeedResult, RetryableError};
pub use json::JsonError;
pub use rate_limit::{RateLimitError, RateLimitErrorKind, RateLimitResult};
