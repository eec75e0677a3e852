//! Configuration initialization and hierarchy management

use std::path::{Path, PathBuf};

use tracing::info;

use crate::adapters::TomlConfigAdapter;
use crate::cli::MergeArgs;
use crate::domain::model::{MergerConfig, QualityProfile};
use crate::error::{MergerError, MergerResult};

/// Environment variables recognised as configuration overrides
pub const ENV_OVERRIDES: &[&str] = &[
    "SCENE_MERGER_MEDIA_ROOT",
    "SCENE_MERGER_OUTPUT_DIR",
    "SCENE_MERGER_QUALITY",
    "SCENE_MERGER_THREADS",
    "SCENE_MERGER_PRESET",
    "SCENE_MERGER_FFMPEG",
    "SCENE_MERGER_FFPROBE",
];

/// Initialize configuration hierarchy following precedence: CLI > Env > File > Defaults
pub fn initialize_configuration_hierarchy(args: &MergeArgs) -> MergerResult<MergerConfig> {
    info!("Initializing configuration hierarchy");

    let base = std::env::current_dir()?;
    load_configuration(args, &base, |key| std::env::var(key).ok())
}

/// Build the configuration from a search base and an environment lookup
pub fn load_configuration<F>(args: &MergeArgs, base: &Path, lookup: F) -> MergerResult<MergerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match TomlConfigAdapter::discover(args.config.as_deref(), base)? {
        Some((path, config)) => {
            info!("Using configuration file: {}", path.display());
            config
        }
        None => MergerConfig::default(),
    };

    let env_overrides = apply_environment_overrides(&mut config, lookup)?;
    if env_overrides > 0 {
        info!("Applied {} environment variable overrides", env_overrides);
    }

    let cli_overrides = apply_cli_overrides(&mut config, args);
    if cli_overrides > 0 {
        info!("Applied {} CLI configuration overrides", cli_overrides);
    }

    config.validate()?;
    info!("Configuration hierarchy initialized successfully");
    Ok(config)
}

/// Apply `SCENE_MERGER_*` overrides; returns how many were applied
pub fn apply_environment_overrides<F>(config: &mut MergerConfig, lookup: F) -> MergerResult<usize>
where
    F: Fn(&str) -> Option<String>,
{
    let mut applied = 0;

    for key in ENV_OVERRIDES {
        let Some(value) = lookup(key).filter(|v| !v.trim().is_empty()) else {
            continue;
        };
        info!("Found environment override: {} = {}", key, value);

        match *key {
            "SCENE_MERGER_MEDIA_ROOT" => config.media_root = PathBuf::from(value),
            "SCENE_MERGER_OUTPUT_DIR" => config.output_dir = PathBuf::from(value),
            "SCENE_MERGER_QUALITY" => config.default_quality = value,
            "SCENE_MERGER_THREADS" => {
                config.threads = value.trim().parse().map_err(|_| MergerError::InvalidOverride {
                    key: key.to_string(),
                    value: value.clone(),
                })?;
            }
            "SCENE_MERGER_PRESET" => config.preset = value,
            "SCENE_MERGER_FFMPEG" => config.ffmpeg_path = PathBuf::from(value),
            "SCENE_MERGER_FFPROBE" => config.ffprobe_path = PathBuf::from(value),
            _ => continue,
        }
        applied += 1;
    }

    Ok(applied)
}

/// Apply command-line overrides; returns how many were applied
pub fn apply_cli_overrides(config: &mut MergerConfig, args: &MergeArgs) -> usize {
    let mut applied = 0;

    if let Some(media_root) = &args.media_root {
        info!("CLI override: media_root = {}", media_root.display());
        config.media_root = media_root.clone();
        applied += 1;
    }
    if let Some(output_dir) = &args.output_dir {
        info!("CLI override: output_dir = {}", output_dir.display());
        config.output_dir = output_dir.clone();
        applied += 1;
    }
    if let Some(threads) = args.threads {
        info!("CLI override: threads = {}", threads);
        config.threads = threads;
        applied += 1;
    }
    if let Some(preset) = &args.preset {
        info!("CLI override: preset = {}", preset);
        config.preset = preset.clone();
        applied += 1;
    }

    applied
}

/// Quality to merge: the positional argument, else the configured default
pub fn resolve_quality(args: &MergeArgs, config: &MergerConfig) -> MergerResult<QualityProfile> {
    let label = args.quality.as_deref().unwrap_or(&config.default_quality);
    Ok(QualityProfile::parse(label)?)
}
