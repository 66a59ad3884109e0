//! Wire shape of one feed response.

use crate::Listing;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Paging block of a feed response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, Getters)]
pub struct PagingInfo {
    /// Total number of pages for the query
    #[serde(rename = "AantalPaginas")]
    total_pages: u32,
    /// 1-based index of this page
    #[serde(rename = "HuidigePagina")]
    current_page: u32,
    /// Relative link to the next page
    #[serde(rename = "VolgendeUrl", default)]
    next_url: Option<String>,
    /// Relative link to the previous page
    #[serde(rename = "VorigeUrl", default)]
    previous_url: Option<String>,
}

impl PagingInfo {
    /// Creates paging information without navigation links.
    pub fn new(total_pages: u32, current_page: u32) -> Self {
        Self {
            total_pages,
            current_page,
            next_url: None,
            previous_url: None,
        }
    }
}

/// One page of listings.
///
/// The next/previous links are part of the wire shape but pagination is
/// driven by [`PagingInfo::total_pages`] alone.
///
/// # Examples
///
/// ```
/// use makelaar_core::FeedPage;
///
/// let page: FeedPage = serde_json::from_str(
///     r#"{
///         "TotaalAantalObjecten": 2,
///         "Paging": {"AantalPaginas": 1, "HuidigePagina": 1, "VolgendeUrl": null, "VorigeUrl": null},
///         "Objects": [
///             {"MakelaarId": 1, "MakelaarNaam": "A"},
///             {"MakelaarId": 2, "MakelaarNaam": null}
///         ]
///     }"#,
/// )
/// .unwrap();
///
/// assert_eq!(*page.paging().total_pages(), 1);
/// assert_eq!(page.into_listings().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters)]
pub struct FeedPage {
    /// Total number of listings matching the query
    #[serde(
        rename = "TotaalAantalObjecten",
        alias = "TotaalAantalObjecteren",
        default
    )]
    total_objects: u64,
    /// Paging information
    #[serde(rename = "Paging")]
    paging: PagingInfo,
    /// Listings on this page; the feed may send `null`
    #[serde(rename = "Objects", default)]
    objects: Option<Vec<Listing>>,
}

impl FeedPage {
    /// Creates a page from its parts.
    pub fn new(total_objects: u64, paging: PagingInfo, objects: Vec<Listing>) -> Self {
        Self {
            total_objects,
            paging,
            objects: Some(objects),
        }
    }

    /// Number of listings on this page.
    pub fn len(&self) -> usize {
        self.objects.as_ref().map_or(0, Vec::len)
    }

    /// Returns true when the page carries no listings.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Consumes the page, yielding its listings in feed order.
    pub fn into_listings(self) -> Vec<Listing> {
        self.objects.unwrap_or_default()
    }
}
