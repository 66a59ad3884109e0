//! Command-line interface module.
//!
//! This module provides the CLI structure and command handlers for the makelaar binary.

mod commands;
mod report;

pub use commands::{Cli, Commands, OutputFormat, ReportOptions};
pub use report::{handle_fetch, handle_report};
