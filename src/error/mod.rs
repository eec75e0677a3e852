//! Error handling module for the scene merger

use thiserror::Error;

use crate::domain::errors::DomainError;

/// Application-level error type
#[derive(Error, Debug)]
pub enum MergerError {
    /// Configuration file missing or invalid
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// Environment override with an unusable value
    #[error("Invalid value for {key}: {value}")]
    InvalidOverride { key: String, value: String },

    /// TOML parse error
    #[error("Failed to parse configuration: {0}")]
    TomlError(#[from] toml::de::Error),

    /// Domain error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// I/O error
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for application operations
pub type MergerResult<T> = std::result::Result<T, MergerError>;
