//! Core data types for the makelaar listing feed toolkit.
//!
//! This crate provides the query, wire-page and record types shared by the
//! feed client, the aggregator and the command-line front end.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod listing;
mod page;
mod query;
mod stat;

pub use listing::Listing;
pub use page::{FeedPage, PagingInfo};
pub use query::{FeedQuery, FeedQueryBuilder};
pub use stat::AgentStat;
