//! Search query for the listing feed.

use derive_builder::Builder;
use derive_getters::Getters;
use makelaar_error::BuilderError;
use serde::{Deserialize, Serialize};

/// An immutable listing search, reused for every page of one fetch.
///
/// Only the page number varies between requests, so it is not part of the query.
///
/// # Examples
///
/// ```
/// use makelaar_core::FeedQuery;
///
/// let query = FeedQuery::builder()
///     .path("/amsterdam/tuin/")
///     .build()
///     .unwrap();
///
/// assert_eq!(query.search_type(), "koop");
/// assert_eq!(*query.page_size(), 25);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Builder, Getters)]
#[builder(
    setter(into),
    build_fn(validate = "Self::validate", error = "BuilderError")
)]
pub struct FeedQuery {
    /// Search path segment, e.g. `/amsterdam/`
    path: String,
    /// Listing category, e.g. `koop` (for sale) or `huur` (for rent)
    #[builder(default = "\"koop\".to_string()")]
    search_type: String,
    /// Number of listings per page
    #[builder(default = "25")]
    page_size: u32,
}

impl FeedQuery {
    /// Creates a new builder for `FeedQuery`.
    pub fn builder() -> FeedQueryBuilder {
        FeedQueryBuilder::default()
    }
}

impl FeedQueryBuilder {
    fn validate(&self) -> Result<(), String> {
        if self.page_size == Some(0) {
            return Err("page_size must be a positive integer".to_string());
        }
        if let Some(search_type) = &self.search_type {
            if search_type.trim().is_empty() {
                return Err("search_type must not be empty".to_string());
            }
        }
        Ok(())
    }
}
