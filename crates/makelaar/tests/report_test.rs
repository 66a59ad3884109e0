//! Report building and table rendering.

use async_trait::async_trait;
use makelaar::{
    AgentStat, FeedClient, FeedConfig, FeedResult, MakelaarErrorKind, Method, QueryReport,
    QuerySpec, ReportConfig, RetryConfig, Transport, TransportResponse, build_report,
    render_table, run_reports, truncate_name,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio_util::sync::CancellationToken;

/// Serves one page per request and records the requested paths.
struct PagedTransport {
    pages: Mutex<VecDeque<(u16, String)>>,
    paths: Mutex<Vec<String>>,
}

impl PagedTransport {
    fn new(pages: Vec<(u16, String)>) -> Arc<Self> {
        Arc::new(Self {
            pages: Mutex::new(pages.into()),
            paths: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl Transport for PagedTransport {
    async fn send(&self, _method: Method, path: &str) -> FeedResult<TransportResponse> {
        self.paths.lock().unwrap().push(path.to_string());
        let (status, body) = self.pages.lock().unwrap().pop_front().unwrap();
        Ok(TransportResponse::new(status, "", body))
    }
}

fn page(total_pages: u32, current_page: u32, agents: &[(i64, &str)]) -> (u16, String) {
    let objects: Vec<serde_json::Value> = agents
        .iter()
        .map(|(id, name)| serde_json::json!({"MakelaarId": id, "MakelaarNaam": name}))
        .collect();
    let body = serde_json::json!({
        "TotaalAantalObjecten": objects.len(),
        "Paging": {"AantalPaginas": total_pages, "HuidigePagina": current_page},
        "Objects": objects,
    });
    (200, body.to_string())
}

fn client(transport: Arc<PagedTransport>) -> FeedClient {
    let limiter = Arc::new(makelaar::FixedDelayRateLimiter::new(std::time::Duration::ZERO));
    FeedClient::new(transport, limiter, "KEY")
}

#[test]
fn test_table_layout() {
    let stats = vec![
        AgentStat::new(24648, "Hoekstra Makelaardij", 40),
        AgentStat::new(12285, "Broersma Wonen", 7),
    ];

    let table = render_table("Top 10 makelaars in Amsterdam (koop)", &stats);
    let lines: Vec<&str> = table.lines().collect();

    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Top 10 makelaars in Amsterdam (koop)");
    assert_eq!(lines[1], "-".repeat(lines[0].len()));
    assert_eq!(
        lines[2],
        format!("{:<3} {:<10} {:<40} {:>8}", "#", "ID", "Makelaar", "Objects")
    );
    assert_eq!(
        lines[3],
        format!("1   24648      {:<40}       40", "Hoekstra Makelaardij")
    );
    assert!(lines[4].starts_with("2   12285      Broersma Wonen"));
}

#[test]
fn test_long_names_are_truncated_in_table() {
    let long = "Makelaarskantoor Van Der Linden En Zonen Amsterdam";
    let table = render_table("T", &[AgentStat::new(1, long, 1)]);
    let row = table.lines().nth(3).unwrap();

    let expected: String = long.chars().take(37).collect();
    assert!(row.contains(&format!("{}...", expected)));
    assert_eq!(row.chars().count(), 3 + 1 + 10 + 1 + 40 + 1 + 8);
}

#[test]
fn test_truncate_name_boundaries() {
    let exactly_40 = "a".repeat(40);
    assert_eq!(truncate_name(&exactly_40, 40), exactly_40);

    let over = "b".repeat(41);
    assert_eq!(truncate_name(&over, 40), format!("{}...", "b".repeat(37)));

    assert_eq!(truncate_name("", 40), "");
}

#[test]
fn test_empty_table_has_header_only() {
    let table = render_table("Leeg", &[]);
    assert_eq!(table.lines().count(), 3);
}

#[test]
fn test_rendered_report_starts_with_summary() {
    let report = QueryReport::new("Amsterdam", "Top 1", 3, vec![AgentStat::new(1, "A", 3)]);

    let rendered = report.render();
    assert!(rendered.starts_with("Amsterdam: fetched 3 objects.\n\nTop 1\n-----\n"));
}

#[tokio::test]
async fn test_build_report_fetches_all_pages_and_ranks() -> anyhow::Result<()> {
    let transport = PagedTransport::new(vec![
        page(2, 1, &[(1, "A"), (2, "B"), (2, "B")]),
        page(2, 2, &[(3, ""), (2, "B"), (1, "A")]),
    ]);
    let config = ReportConfig {
        top_n: 1,
        ..ReportConfig::default()
    };
    let search = QuerySpec::new("Amsterdam", "/amsterdam/");

    let report = build_report(
        &client(transport.clone()),
        &config,
        &search,
        &CancellationToken::new(),
    )
    .await?;

    assert_eq!(*report.fetched(), 6);
    assert_eq!(report.stats(), &vec![AgentStat::new(2, "B", 3)]);
    assert_eq!(report.heading(), "Top 1 makelaars in Amsterdam (koop)");
    assert_eq!(transport.paths.lock().unwrap().len(), 2);
    Ok(())
}

#[tokio::test]
async fn test_run_reports_runs_queries_in_order() -> anyhow::Result<()> {
    let transport = PagedTransport::new(vec![
        page(1, 1, &[(1, "A")]),
        page(1, 1, &[(2, "B"), (3, "C")]),
    ]);
    let config = ReportConfig {
        search_type: "huur".to_string(),
        page_size: 10,
        ..ReportConfig::default()
    };

    let reports = run_reports(
        &client(transport.clone()),
        &config,
        &CancellationToken::new(),
        |_| Ok(()),
    )
    .await?;

    let titles: Vec<&str> = reports.iter().map(|r| r.title().as_str()).collect();
    assert_eq!(titles, vec!["Amsterdam", "Amsterdam + tuin"]);
    assert_eq!(*reports[1].fetched(), 2);
    assert_eq!(
        *transport.paths.lock().unwrap(),
        vec![
            "feeds/Aanbod.svc/json/KEY/?type=huur&zo=/amsterdam/&page=1&pagesize=10".to_string(),
            "feeds/Aanbod.svc/json/KEY/?type=huur&zo=/amsterdam/tuin/&page=1&pagesize=10"
                .to_string(),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn test_completed_reports_are_delivered_before_a_later_failure() {
    let transport = PagedTransport::new(vec![
        page(1, 1, &[(1, "A")]),
        (401, String::new()),
    ]);
    let mut delivered: Vec<QueryReport> = Vec::new();

    let err = run_reports(
        &client(transport),
        &ReportConfig::default(),
        &CancellationToken::new(),
        |report| {
            delivered.push(report.clone());
            Ok(())
        },
    )
    .await
    .unwrap_err();

    assert!(err.is_quota_exceeded());
    assert_eq!(delivered.len(), 1);
    assert_eq!(delivered[0].title(), "Amsterdam");
    assert_eq!(*delivered[0].fetched(), 1);
    assert!(
        delivered[0]
            .render()
            .starts_with("Amsterdam: fetched 1 objects.")
    );
}

#[tokio::test]
async fn test_quota_exhaustion_fails_the_report() {
    let transport = PagedTransport::new(vec![
        page(2, 1, &[(1, "A")]),
        (401, String::new()),
    ]);
    let search = QuerySpec::new("Amsterdam", "/amsterdam/");

    let err = build_report(
        &client(transport),
        &ReportConfig::default(),
        &search,
        &CancellationToken::new(),
    )
    .await
    .unwrap_err();

    assert!(err.is_quota_exceeded());
}

#[test]
fn test_zero_page_size_is_rejected_before_fetching() {
    let config = ReportConfig {
        page_size: 0,
        ..ReportConfig::default()
    };

    let err = config
        .feed_query(&QuerySpec::new("Amsterdam", "/amsterdam/"))
        .unwrap_err();
    assert!(matches!(err.kind(), MakelaarErrorKind::Builder(_)));
}

#[test]
fn test_missing_api_key_is_reported_before_any_request() {
    let limiter = Arc::new(makelaar::FixedDelayRateLimiter::new(std::time::Duration::ZERO));
    let err = FeedClient::from_config(&FeedConfig::default(), &RetryConfig::default(), limiter)
        .unwrap_err();

    match err.kind() {
        MakelaarErrorKind::Config(config) => assert!(config.message.contains("FUNDA_API_KEY")),
        other => panic!("expected a configuration error, got {}", other),
    }
}
