//! Command implementations

use anyhow::{Context, Result};
use tracing::info;

use crate::app::{AppContainer, DefaultAppContainer};
use crate::cli::args::MergeArgs;
use crate::config_initialization;
use crate::domain::model::{MergeOutcome, MergeRequest, QualityProfile};
use crate::utils::Utils;

const RULE_WIDTH: usize = 70;

/// Execute the merge command
pub async fn merge(args: MergeArgs) -> Result<()> {
    info!("Starting merge operation");

    let config = config_initialization::initialize_configuration_hierarchy(&args)
        .context("Failed to load configuration")?;
    let quality = config_initialization::resolve_quality(&args, &config)
        .context("Invalid quality profile")?;

    info!("Quality: {}", quality);
    info!("Media root: {}", config.media_root.display());
    info!("Output: {}", config.output_path().display());

    let quiet = args.quiet || args.json;
    if !quiet {
        print_banner(&quality);
    }

    let container = DefaultAppContainer::new(config, quiet)
        .context("Failed to set up the merge pipeline")?;
    let outcome = container
        .merge_interactor()
        .execute(MergeRequest::new(quality))
        .await
        .context("Scene merge failed")?;

    if args.json {
        let json = serde_json::to_string_pretty(&outcome)
            .context("Failed to serialize merge outcome")?;
        println!("{}", json);
    } else if args.quiet {
        print_outcome(&outcome);
    } else {
        println!("\n{}", "=".repeat(RULE_WIDTH));
        println!("Done!");
        println!("{}", "=".repeat(RULE_WIDTH));
    }

    Ok(())
}

fn print_banner(quality: &QualityProfile) {
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("  PRESENTATION SCENE MERGER");
    println!("{}", "=".repeat(RULE_WIDTH));
    println!("\nQuality: {}", quality);
    println!("{}\n", "-".repeat(RULE_WIDTH));
}

/// One-shot report for quiet mode
fn print_outcome(outcome: &MergeOutcome) {
    match outcome {
        MergeOutcome::MissingScenes(report) => {
            println!("{} file(s) missing:", report.count());
            for reference in &report.missing {
                println!("  {}", reference.path.display());
            }
            for command in &report.render_commands {
                println!("  {}", command);
            }
        }
        MergeOutcome::Merged(summary) => {
            println!(
                "{} ({}, {})",
                summary.output_path.display(),
                Utils::format_file_size(summary.output_size),
                summary.total_duration.format_hms()
            );
        }
    }
}
