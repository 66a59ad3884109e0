//! CLI command definitions.

use clap::{Args, Parser, Subcommand, ValueEnum};
use makelaar::ReportConfig;
use std::path::PathBuf;

/// Makelaar - rank real-estate agents by the number of listings they hold
#[derive(Parser, Debug)]
#[command(name = "makelaar")]
#[command(about = "Rank real-estate agents by listing count from the partner feed", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file to use instead of the user config files
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run every configured query and print a ranked table for each
    Report {
        #[command(flatten)]
        options: ReportOptions,
    },

    /// Fetch a single search path and print its ranked table
    Fetch {
        /// Feed search path, e.g. /amsterdam/tuin/
        path: String,

        /// Label for the output (defaults to the path)
        #[arg(long)]
        title: Option<String>,

        #[command(flatten)]
        options: ReportOptions,
    },
}

/// Overrides for the `[report]` settings
#[derive(Args, Debug, Clone, Default)]
pub struct ReportOptions {
    /// Number of agents per table
    #[arg(long)]
    pub top: Option<usize>,

    /// Listings requested per page
    #[arg(long)]
    pub page_size: Option<u32>,

    /// Listing category, e.g. koop or huur
    #[arg(long = "type")]
    pub search_type: Option<String>,

    /// Output format
    #[arg(long, value_enum, default_value = "human")]
    pub format: OutputFormat,
}

impl ReportOptions {
    /// Apply the given flags on top of the configured report settings.
    pub fn apply(&self, report: &mut ReportConfig) {
        if let Some(top) = self.top {
            report.top_n = top;
        }
        if let Some(page_size) = self.page_size {
            report.page_size = page_size;
        }
        if let Some(search_type) = &self.search_type {
            report.search_type = search_type.clone();
        }
    }
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Human,
    /// JSON array of reports
    Json,
}
