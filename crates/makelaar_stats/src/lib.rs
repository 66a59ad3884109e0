//! Ranking of agents by the number of listings they hold.
//!
//! A pure reduction over fetched listings; see [`top_by_object_count`].

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod aggregate;

pub use aggregate::top_by_object_count;
