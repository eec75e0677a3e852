//! Presentation Scene Merger Library
//!
//! Locates the rendered presentation scenes for a quality profile, reports
//! the ones that still need rendering, and otherwise concatenates them into
//! one video with FFmpeg.

pub mod adapters;
pub mod app;
pub mod cli;
pub mod config_initialization;
pub mod domain;
pub mod error;
pub mod ports;
pub mod utils;

// Re-export commonly used types
pub use domain::errors::DomainError;
pub use domain::model::{MergeOutcome, MergeRequest, MergeSummary, MergerConfig, MissingScenes, QualityProfile};
pub use error::{MergerError, MergerResult};
