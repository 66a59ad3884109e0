//! Request path template.

use makelaar_core::FeedQuery;

/// Build the request path for one page, relative to the feed base URL.
///
/// Query values are inserted literally, without percent-encoding; the feed
/// expects search paths such as `/amsterdam/tuin/` verbatim in `zo`.
///
/// # Examples
///
/// ```
/// use makelaar_core::FeedQuery;
/// use makelaar_feed::request_path;
///
/// let query = FeedQuery::builder().path("/amsterdam/").build().unwrap();
///
/// assert_eq!(
///     request_path("KEY", &query, 3),
///     "feeds/Aanbod.svc/json/KEY/?type=koop&zo=/amsterdam/&page=3&pagesize=25"
/// );
/// ```
pub fn request_path(api_key: &str, query: &FeedQuery, page: u32) -> String {
    format!(
        "feeds/Aanbod.svc/json/{}/?type={}&zo={}&page={}&pagesize={}",
        api_key,
        query.search_type(),
        query.path(),
        page,
        query.page_size()
    )
}
