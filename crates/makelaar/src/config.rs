//! Layered configuration for the makelaar CLI.
//!
//! Sources, lowest precedence first:
//! - Bundled defaults (`makelaar.toml` shipped with the crate)
//! - `~/.config/makelaar/makelaar.toml`
//! - `./makelaar.toml`
//! - `MAKELAAR_`-prefixed environment variables, `__` separating sections
//!   (`MAKELAAR_RATE_LIMIT__REQUESTS_PER_MINUTE=60`)
//! - `FUNDA_API_KEY` for `feed.api_key`

use crate::ReportConfig;
use config::{Config, ConfigBuilder, Environment, File, FileFormat, builder::DefaultState};
use makelaar_error::{ConfigError, MakelaarError, MakelaarResult};
use makelaar_feed::{FeedConfig, RetryConfig};
use makelaar_rate_limit::RateLimitConfig;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, instrument};

/// Bundled default configuration.
const DEFAULT_CONFIG: &str = include_str!("../../../makelaar.toml");

/// Environment variable holding the partner API key.
const API_KEY_VAR: &str = "FUNDA_API_KEY";

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakelaarConfig {
    /// Feed connection (`[feed]`)
    #[serde(default)]
    pub feed: FeedConfig,

    /// Limiter selection (`[rate_limit]`)
    #[serde(default)]
    pub rate_limit: RateLimitConfig,

    /// Transient failure retries (`[retry]`)
    #[serde(default)]
    pub retry: RetryConfig,

    /// Queries and table size (`[report]`)
    #[serde(default)]
    pub report: ReportConfig,
}

impl MakelaarConfig {
    /// Load configuration from every layer.
    ///
    /// User config files are optional and silently skipped if not found.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use makelaar::MakelaarConfig;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = MakelaarConfig::load()?;
    /// println!("{} queries configured", config.report.queries.len());
    /// # Ok(())
    /// # }
    /// ```
    #[instrument]
    pub fn load() -> MakelaarResult<Self> {
        debug!("Loading configuration with precedence: env > current dir > home dir > bundled defaults");

        let mut builder = defaults();

        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/makelaar/makelaar.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        builder = builder.add_source(File::with_name("makelaar").required(false));

        finish(with_environment(builder)?)
    }

    /// Load configuration from an explicit file instead of the user config files.
    ///
    /// Bundled defaults still fill in unset values and the environment still
    /// takes precedence.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> MakelaarResult<Self> {
        debug!("Loading configuration from file");

        let builder = defaults().add_source(File::from(path.as_ref()));
        finish(with_environment(builder)?)
    }

    /// Parse configuration from a TOML string layered over the bundled defaults.
    ///
    /// The environment is not consulted.
    ///
    /// # Examples
    ///
    /// ```
    /// use makelaar::MakelaarConfig;
    ///
    /// let config = MakelaarConfig::from_toml("[report]\ntop_n = 3\n").unwrap();
    /// assert_eq!(config.report.top_n, 3);
    /// assert_eq!(config.report.page_size, 25);
    /// ```
    pub fn from_toml(toml: &str) -> MakelaarResult<Self> {
        finish(defaults().add_source(File::from_str(toml, FileFormat::Toml)))
    }
}

fn defaults() -> ConfigBuilder<DefaultState> {
    Config::builder().add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
}

fn with_environment(
    builder: ConfigBuilder<DefaultState>,
) -> MakelaarResult<ConfigBuilder<DefaultState>> {
    let builder = builder
        .add_source(
            Environment::with_prefix("MAKELAAR")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .set_override_option("feed.api_key", std::env::var(API_KEY_VAR).ok())
        .map_err(|e| ConfigError::new(format!("Failed to apply {}: {}", API_KEY_VAR, e)))?;
    Ok(builder)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> MakelaarResult<MakelaarConfig> {
    builder
        .build()
        .map_err(|e| {
            MakelaarError::from(ConfigError::new(format!(
                "Failed to build configuration: {}",
                e
            )))
        })?
        .try_deserialize()
        .map_err(|e| {
            MakelaarError::from(ConfigError::new(format!(
                "Failed to parse configuration: {}",
                e
            )))
        })
}
