//! Command-line argument definitions

use std::path::PathBuf;

use clap::Args;

/// Arguments for the merge command
#[derive(Args, Debug, Clone, Default)]
pub struct MergeArgs {
    /// Quality profile directory to merge (e.g. 480p15, 720p30, 1080p60) [default: 1080p60]
    pub quality: Option<String>,

    /// Configuration file (default: config/merger.toml or scene_merger.toml if present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Root of the rendered media tree
    #[arg(long)]
    pub media_root: Option<PathBuf>,

    /// Directory to write the merged presentation to
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Encoder thread count
    #[arg(long)]
    pub threads: Option<usize>,

    /// Encoding preset
    #[arg(long)]
    pub preset: Option<String>,

    /// Print the merge outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}
