// Merge interactor - Orchestrates the scene merge use case

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;
use crate::ports::*;

/// Interactor for merging the rendered scenes into one presentation
pub struct MergeInteractor {
    probe_port: Arc<dyn ProbePort>,
    execute_port: Arc<dyn ExecutePort>,
    fs_port: Arc<dyn FsPort>,
    progress_port: Arc<dyn ProgressPort>,
    config: MergerConfig,
}

impl MergeInteractor {
    /// Create new merge interactor with injected ports
    pub fn new(
        probe_port: Arc<dyn ProbePort>,
        execute_port: Arc<dyn ExecutePort>,
        fs_port: Arc<dyn FsPort>,
        progress_port: Arc<dyn ProgressPort>,
        config: MergerConfig,
    ) -> Self {
        Self {
            probe_port,
            execute_port,
            fs_port,
            progress_port,
            config,
        }
    }

    /// Run the merge pipeline.
    ///
    /// Missing scenes are reported as [`MergeOutcome::MissingScenes`] without
    /// touching any file. Every other failure is returned as an error.
    pub async fn execute(&self, request: MergeRequest) -> Result<MergeOutcome, DomainError> {
        let quality = request.quality;
        let references =
            SceneReference::resolve_all(&self.config.media_root, &quality, self.config.extension());

        info!(quality = %quality, scenes = references.len(), "Starting scene merge");

        self.progress_port.on_check_start(&quality);
        let missing = self.find_missing(&references).await?;
        if !missing.is_empty() {
            let report = RemediationPlanner::missing_report(&quality, missing);
            warn!(missing = report.count(), "Scene files missing, nothing merged");
            self.progress_port.on_missing_scenes(&report);
            return Ok(MergeOutcome::MissingScenes(report));
        }

        let clips = self.load_clips(references).await?;
        let clip_summaries: Vec<ClipSummary> = clips
            .iter()
            .map(|clip| ClipSummary {
                index: clip.reference().index,
                path: clip.path().to_path_buf(),
                duration: clip.duration(),
            })
            .collect();

        let sequence = CanvasPlanner::compose(clips, quality.frame_rate())?;
        let total_duration = sequence.total_duration();
        let canvas = sequence.canvas();
        info!(
            total_seconds = total_duration.as_seconds(),
            width = canvas.width,
            height = canvas.height,
            "Composite sequence ready"
        );
        self.progress_port.on_sequence_ready(total_duration);

        let settings = ExportPlanner::settings(&self.config, &quality);
        self.progress_port.on_export_start(&settings.output_path, settings.frame_rate);

        // The sequence (and every clip it owns) is released before the result is inspected.
        let export = self.execute_port.export(&sequence, &settings).await;
        drop(sequence);
        let report = export?;

        let output_size = self.fs_port.get_file_size(&report.output_path).await?;
        let output_duration = self.measure_output(&report, total_duration, settings.frame_rate).await;

        let summary = MergeSummary {
            quality,
            frame_rate: settings.frame_rate,
            canvas,
            clips: clip_summaries,
            total_duration,
            output_path: report.output_path,
            output_size,
            output_duration,
            audio_muxed: report.audio_muxed,
        };

        info!(
            output = %summary.output_path.display(),
            bytes = summary.output_size,
            audio = summary.audio_muxed,
            "Merge completed"
        );
        self.progress_port.on_export_complete(&summary);

        Ok(MergeOutcome::Merged(summary))
    }

    /// Existence check for every scene; collects all misses in scene order
    async fn find_missing(
        &self,
        references: &[SceneReference],
    ) -> Result<Vec<SceneReference>, DomainError> {
        let mut missing = Vec::new();
        for reference in references {
            let found = self.fs_port.file_exists(&reference.path).await?;
            debug!(scene = reference.index, path = %reference.path.display(), found, "Checked scene file");
            self.progress_port.on_scene_checked(reference, found);
            if !found {
                missing.push(reference.clone());
            }
        }
        Ok(missing)
    }

    /// Probe and open every scene in order.
    ///
    /// On failure the handles opened so far are dropped with the partial vector.
    async fn load_clips(&self, references: Vec<SceneReference>) -> Result<Vec<ClipHandle>, DomainError> {
        let total = references.len();
        let mut clips = Vec::with_capacity(total);

        for (position, reference) in references.into_iter().enumerate() {
            let info = self.probe_port.probe_media(&reference.path).await?;
            let clip = ClipHandle::open(reference, info)?;
            debug!(
                scene = clip.reference().index,
                seconds = clip.duration().as_seconds(),
                audio = clip.has_audio(),
                "Loaded clip"
            );
            self.progress_port.on_clip_loaded(position + 1, total, clip.duration());
            clips.push(clip);
        }

        Ok(clips)
    }

    /// Best-effort duration of the written file
    async fn measure_output(
        &self,
        report: &ExportReport,
        total_duration: TimeSpec,
        frame_rate: u32,
    ) -> Option<TimeSpec> {
        match self.probe_port.probe_media(&report.output_path).await {
            Ok(info) => {
                if !OutputValidator::covers_clips(total_duration, info.duration, frame_rate) {
                    warn!(
                        expected = total_duration.as_seconds(),
                        measured = info.duration.as_seconds(),
                        "Merged output is shorter than the summed clip durations"
                    );
                }
                Some(info.duration)
            }
            Err(e) => {
                warn!("Could not probe merged output: {}", e);
                None
            }
        }
    }
}
