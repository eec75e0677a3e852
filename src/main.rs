//! Presentation Scene Merger
//!
//! Joins the four rendered presentation scenes, in scene order, into a single
//! `COMPLETE_PRESENTATION` video using the system FFmpeg tools.
//!
//! # Usage
//!
//! ```bash
//! merge-scenes              # 1080p60
//! merge-scenes 480p15
//! merge-scenes 720p30 --media-root render/media --output-dir dist
//! ```

use anyhow::Result;
use clap::Parser;
use tracing::info;

use scene_merger::cli::{commands, Cli};
use scene_merger::utils::logging::init_logging;

/// Main entry point for the scene merger
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level, cli.log_format)?;

    info!("Starting scene merger");
    commands::merge(cli.merge).await?;
    info!("Scene merger completed successfully");
    Ok(())
}
