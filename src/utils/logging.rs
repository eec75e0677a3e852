//! Diagnostic logging setup

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use crate::error::{MergerError, MergerResult};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable multi-line format
    Pretty,
    /// Compact single-line format
    #[default]
    Compact,
    /// JSON format for structured logging
    Json,
}

/// Build the filter: `RUST_LOG` wins over the configured level
fn build_filter(level: &str) -> MergerResult<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|e| MergerError::ConfigError {
        message: format!("Invalid log level '{}': {}", level, e),
    })
}

/// Install the global tracing subscriber. Logs go to stderr so stdout only
/// carries the merge report.
pub fn init_logging(level: &str, format: LogFormat) -> MergerResult<()> {
    let filter = build_filter(level)?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false);

    let installed = match format {
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| MergerError::ConfigError {
        message: format!("Failed to initialize logging: {}", e),
    })
}
