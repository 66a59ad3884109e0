//! Per-query agent reports and their text rendering.

use derive_getters::Getters;
use makelaar_core::{AgentStat, FeedQuery};
use makelaar_error::MakelaarResult;
use makelaar_feed::FeedClient;
use makelaar_stats::top_by_object_count;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument};

/// Column width of the agent name in rendered tables.
const NAME_WIDTH: usize = 40;

/// One named search to report on (`[[report.queries]]`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySpec {
    /// Label used in output, e.g. `Amsterdam`
    pub title: String,
    /// Feed search path, e.g. `/amsterdam/tuin/`
    pub path: String,
}

impl QuerySpec {
    /// Creates a query specification.
    pub fn new(title: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            path: path.into(),
        }
    }
}

/// Report settings (`[report]` table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Number of agents per table
    #[serde(default = "default_top_n")]
    pub top_n: usize,

    /// Listings requested per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Listing category for every query
    #[serde(default = "default_search_type")]
    pub search_type: String,

    /// Queries to run, in order
    #[serde(default = "default_queries")]
    pub queries: Vec<QuerySpec>,
}

fn default_top_n() -> usize {
    10
}

fn default_page_size() -> u32 {
    25
}

fn default_search_type() -> String {
    "koop".to_string()
}

fn default_queries() -> Vec<QuerySpec> {
    vec![
        QuerySpec::new("Amsterdam", "/amsterdam/"),
        QuerySpec::new("Amsterdam + tuin", "/amsterdam/tuin/"),
    ]
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: default_top_n(),
            page_size: default_page_size(),
            search_type: default_search_type(),
            queries: default_queries(),
        }
    }
}

impl ReportConfig {
    /// Feed query for `search` using this report's type and page size.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size is zero or the search type is blank.
    pub fn feed_query(&self, search: &QuerySpec) -> MakelaarResult<FeedQuery> {
        Ok(FeedQuery::builder()
            .path(search.path.as_str())
            .search_type(self.search_type.as_str())
            .page_size(self.page_size)
            .build()?)
    }

    /// Table heading for `search`.
    ///
    /// # Examples
    ///
    /// ```
    /// use makelaar::{QuerySpec, ReportConfig};
    ///
    /// let config = ReportConfig::default();
    /// let heading = config.heading(&QuerySpec::new("Amsterdam", "/amsterdam/"));
    /// assert_eq!(heading, "Top 10 makelaars in Amsterdam (koop)");
    /// ```
    pub fn heading(&self, search: &QuerySpec) -> String {
        format!(
            "Top {} makelaars in {} ({})",
            self.top_n, search.title, self.search_type
        )
    }
}

/// Outcome of one query: how many listings were fetched and who leads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Getters)]
pub struct QueryReport {
    /// Query label
    title: String,
    /// Table heading
    heading: String,
    /// Total listings fetched across all pages
    fetched: usize,
    /// Ranked agents, at most `top_n`
    stats: Vec<AgentStat>,
}

impl QueryReport {
    /// Creates a report from its parts.
    pub fn new(
        title: impl Into<String>,
        heading: impl Into<String>,
        fetched: usize,
        stats: Vec<AgentStat>,
    ) -> Self {
        Self {
            title: title.into(),
            heading: heading.into(),
            fetched,
            stats,
        }
    }

    /// Summary line followed by a blank line and the ranked table.
    pub fn render(&self) -> String {
        format!(
            "{}: fetched {} objects.\n\n{}",
            self.title,
            self.fetched,
            render_table(&self.heading, &self.stats)
        )
    }
}

/// Fetch every page for `search` and rank its agents.
///
/// # Errors
///
/// Returns the first feed failure; nothing is reported for a failed query.
#[instrument(skip(client, config, cancel), fields(title = %search.title))]
pub async fn build_report(
    client: &FeedClient,
    config: &ReportConfig,
    search: &QuerySpec,
    cancel: &CancellationToken,
) -> MakelaarResult<QueryReport> {
    let query = config.feed_query(search)?;
    let listings = client.fetch_all(&query, cancel).await?;
    let stats = top_by_object_count(&listings, config.top_n);

    info!(fetched = listings.len(), agents = stats.len(), "Built report");
    Ok(QueryReport::new(
        search.title.as_str(),
        config.heading(search),
        listings.len(),
        stats,
    ))
}

/// Run every configured query in order.
///
/// Queries share `client`, and with it the rate limiter, so a later query
/// waits on permits spent by an earlier one. Each report is handed to
/// `on_report` as soon as its query completes, before the next query starts.
///
/// # Errors
///
/// Stops at the first failing query or the first error from `on_report`.
/// Reports already passed to `on_report` stay delivered.
#[instrument(skip_all, fields(queries = config.queries.len()))]
pub async fn run_reports<F>(
    client: &FeedClient,
    config: &ReportConfig,
    cancel: &CancellationToken,
    mut on_report: F,
) -> MakelaarResult<Vec<QueryReport>>
where
    F: FnMut(&QueryReport) -> MakelaarResult<()>,
{
    let mut reports = Vec::with_capacity(config.queries.len());
    for search in &config.queries {
        let report = build_report(client, config, search, cancel).await?;
        on_report(&report)?;
        reports.push(report);
    }
    Ok(reports)
}

/// Render a ranked table under `title`.
///
/// # Examples
///
/// ```
/// use makelaar::{AgentStat, render_table};
///
/// let table = render_table("Top", &[AgentStat::new(24648, "Hoekstra", 12)]);
/// let lines: Vec<&str> = table.lines().collect();
///
/// assert_eq!(lines[0], "Top");
/// assert_eq!(lines[1], "---");
/// assert!(lines[3].starts_with("1   24648      Hoekstra"));
/// assert!(lines[3].ends_with("      12"));
/// ```
pub fn render_table(title: &str, stats: &[AgentStat]) -> String {
    let mut lines = vec![
        title.to_string(),
        "-".repeat(title.chars().count()),
        format!("{:<3} {:<10} {:<40} {:>8}", "#", "ID", "Makelaar", "Objects"),
    ];

    lines.extend(stats.iter().enumerate().map(|(rank, stat)| {
        format!(
            "{:<3} {:<10} {:<40} {:>8}",
            rank + 1,
            stat.agent_id(),
            truncate_name(stat.agent_name(), NAME_WIDTH),
            stat.object_count()
        )
    }));

    let mut table = lines.join("\n");
    table.push('\n');
    table
}

/// Cut `name` to at most `max_len` characters, marking the cut with `...`.
///
/// # Examples
///
/// ```
/// use makelaar::truncate_name;
///
/// assert_eq!(truncate_name("Makelaardij", 40), "Makelaardij");
/// assert_eq!(truncate_name("Makelaardij", 8), "Makel...");
/// assert_eq!(truncate_name("", 8), "");
/// ```
pub fn truncate_name(name: &str, max_len: usize) -> String {
    if name.chars().count() <= max_len {
        return name.to_string();
    }
    let kept: String = name.chars().take(max_len.saturating_sub(3)).collect();
    format!("{}...", kept)
}
