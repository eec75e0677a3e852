//! CLI module for the scene merger
//!
//! This module handles command-line argument parsing and command execution.

use clap::Parser;

use crate::utils::logging::LogFormat;

pub mod args;
pub mod commands;

pub use args::MergeArgs;

/// Presentation Scene Merger
///
/// Joins the four rendered presentation scenes, in order, into
/// COMPLETE_PRESENTATION.<ext>.
#[derive(Parser, Debug)]
#[command(name = "merge-scenes")]
#[command(about = "Merge the rendered presentation scenes into one video")]
#[command(version)]
pub struct Cli {
    /// Logging level for diagnostics on stderr (RUST_LOG takes precedence)
    #[arg(long, env = "SCENE_MERGER_LOG", default_value = "warn")]
    pub log_level: String,

    /// Diagnostic log format
    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[command(flatten)]
    pub merge: MergeArgs,
}
