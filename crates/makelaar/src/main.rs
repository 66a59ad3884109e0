//! Makelaar CLI binary.
//!
//! This binary ranks agents by listing count:
//! - `report` runs every configured query
//! - `fetch` runs a single search path

use clap::Parser;
use makelaar::{MakelaarConfig, MakelaarError, MakelaarErrorKind, MakelaarResult};
use std::process::ExitCode;
use tokio_util::sync::CancellationToken;
use tracing::warn;
use tracing_subscriber::EnvFilter;

mod cli;

use cli::{Cli, Commands, handle_fetch, handle_report};

#[tokio::main]
async fn main() -> ExitCode {
    // .env may hold FUNDA_API_KEY
    dotenvy::dotenv().ok();

    // Parse command-line arguments
    let cli = Cli::parse();

    // Initialize tracing; stdout is reserved for reports
    let default_filter = if cli.verbose {
        "info,makelaar=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    // Ctrl-C cancels the running fetch
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling fetch");
            trigger.cancel();
        }
    });

    match run(cli, &cancel).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!();
            eprintln!("An error occurred:");
            eprintln!("{}", user_message(&e));
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, cancel: &CancellationToken) -> MakelaarResult<()> {
    let config = match &cli.config {
        Some(path) => MakelaarConfig::from_file(path)?,
        None => MakelaarConfig::load()?,
    };

    // Execute the requested command
    match cli.command {
        Commands::Report { options } => handle_report(config, &options, cancel).await,
        Commands::Fetch {
            path,
            title,
            options,
        } => handle_fetch(config, &path, title.as_deref(), &options, cancel).await,
    }
}

/// Error text for the terminal, without source locations for feed failures.
fn user_message(err: &MakelaarError) -> String {
    match err.kind() {
        MakelaarErrorKind::Feed(feed) => feed.kind().to_string(),
        MakelaarErrorKind::Config(config) => config.message.clone(),
        _ => err.to_string(),
    }
}
