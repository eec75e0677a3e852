// TOML config adapter - Configuration loading from TOML files

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::model::MergerConfig;
use crate::error::{MergerError, MergerResult};

/// Locations searched, in order, when no config file is given explicitly
pub const CONFIG_SEARCH_PATHS: &[&str] = &["config/merger.toml", "scene_merger.toml"];

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    merger: MergerConfig,
}

/// TOML configuration adapter
pub struct TomlConfigAdapter;

impl TomlConfigAdapter {
    /// Parse the `[merger]` table of a TOML document; absent keys keep their defaults
    pub fn parse(content: &str) -> MergerResult<MergerConfig> {
        let file: ConfigFile = toml::from_str(content)?;
        Ok(file.merger)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> MergerResult<MergerConfig> {
        let content = std::fs::read_to_string(path).map_err(|e| MergerError::ConfigError {
            message: format!("Failed to read config file {}: {}", path.display(), e),
        })?;
        let config = Self::parse(&content)?;
        info!(path = %path.display(), "Loaded configuration file");
        Ok(config)
    }

    /// Find and load the configuration file.
    ///
    /// An explicit path must exist. Without one, the search paths below `base`
    /// are tried and `None` is returned when none of them exists.
    pub fn discover(
        explicit: Option<&Path>,
        base: &Path,
    ) -> MergerResult<Option<(PathBuf, MergerConfig)>> {
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(MergerError::ConfigError {
                    message: format!("Config file does not exist: {}", path.display()),
                });
            }
            return Self::load_file(path).map(|config| Some((path.to_path_buf(), config)));
        }

        for candidate in CONFIG_SEARCH_PATHS {
            let path = base.join(candidate);
            if path.is_file() {
                return Self::load_file(&path).map(|config| Some((path, config)));
            }
        }

        debug!("No configuration file found, using defaults");
        Ok(None)
    }
}
