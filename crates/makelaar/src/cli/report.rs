//! Report and fetch command handlers.

use super::{OutputFormat, ReportOptions};
use makelaar::{
    FeedClient, JsonError, MakelaarConfig, MakelaarResult, QueryReport, QuerySpec, RateLimiter,
    build_report, run_reports,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

/// Run every configured query and print the results.
///
/// Human output is printed per query as it completes; JSON is printed once
/// every query has succeeded.
#[instrument(skip_all)]
pub async fn handle_report(
    mut config: MakelaarConfig,
    options: &ReportOptions,
    cancel: &CancellationToken,
) -> MakelaarResult<()> {
    options.apply(&mut config.report);
    let client = client_for(&config)?;

    match options.format {
        OutputFormat::Human => {
            let mut printed = 0usize;
            run_reports(&client, &config.report, cancel, |report| {
                if printed > 0 {
                    println!();
                }
                print!("{}", report.render());
                printed += 1;
                Ok(())
            })
            .await?;
            Ok(())
        }
        OutputFormat::Json => {
            let reports = run_reports(&client, &config.report, cancel, |_| Ok(())).await?;
            print_reports(&reports, OutputFormat::Json)
        }
    }
}

/// Fetch a single search path and print its result.
#[instrument(skip(config, options, cancel))]
pub async fn handle_fetch(
    mut config: MakelaarConfig,
    path: &str,
    title: Option<&str>,
    options: &ReportOptions,
    cancel: &CancellationToken,
) -> MakelaarResult<()> {
    options.apply(&mut config.report);
    let client = client_for(&config)?;

    let search = QuerySpec::new(title.unwrap_or(path), path);
    let report = build_report(&client, &config.report, &search, cancel).await?;
    print_reports(&[report], options.format)
}

fn client_for(config: &MakelaarConfig) -> MakelaarResult<FeedClient> {
    let limiter = config.rate_limit.build()?;
    debug!(strategy = limiter.strategy_name(), "Using rate limiter");
    FeedClient::from_config(&config.feed, &config.retry, limiter)
}

fn print_reports(reports: &[QueryReport], format: OutputFormat) -> MakelaarResult<()> {
    match format {
        OutputFormat::Human => {
            let rendered: Vec<String> = reports.iter().map(QueryReport::render).collect();
            print!("{}", rendered.join("\n"));
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(reports)
                .map_err(|e| JsonError::new(format!("Failed to serialize reports: {}", e)))?;
            println!("{}", json);
        }
    }
    Ok(())
}
