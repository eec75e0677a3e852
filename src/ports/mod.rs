// Ports - Interface definitions (contracts)

use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::domain::model::*;

/// Port for media file probing
#[async_trait]
pub trait ProbePort: Send + Sync {
    /// Probe media file and return its duration and stream layout
    async fn probe_media(&self, file_path: &Path) -> Result<MediaInfo, DomainError>;
}

/// Port for rendering a composite sequence into the output file
#[async_trait]
pub trait ExecutePort: Send + Sync {
    /// Encode the sequence to `settings.output_path`, overwriting any existing file
    async fn export(
        &self,
        sequence: &CompositeSequence,
        settings: &ExportSettings,
    ) -> Result<ExportReport, DomainError>;
}

/// Port for file system operations
#[async_trait]
pub trait FsPort: Send + Sync {
    /// Check if file exists
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError>;

    /// Get file size
    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError>;
}

/// Port for human-facing progress reporting.
///
/// Callbacks arrive in pipeline order; implementations must not block.
pub trait ProgressPort: Send + Sync {
    /// Called before the existence checks start
    fn on_check_start(&self, quality: &QualityProfile);

    /// Called once per scene with the result of its existence check
    fn on_scene_checked(&self, reference: &SceneReference, found: bool);

    /// Called when at least one scene is missing; the run stops afterwards
    fn on_missing_scenes(&self, report: &MissingScenes);

    /// Called after scene `position` of `total` has been opened
    fn on_clip_loaded(&self, position: usize, total: usize, duration: TimeSpec);

    /// Called once all clips are joined
    fn on_sequence_ready(&self, total_duration: TimeSpec);

    /// Called right before encoding starts
    fn on_export_start(&self, output_path: &Path, frame_rate: u32);

    /// Called after the output file has been written
    fn on_export_complete(&self, summary: &MergeSummary);
}
