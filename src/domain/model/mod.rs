// Domain models - Core types and data structures

use std::fmt;
use std::fs::File;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::errors::DomainError;

/// Fixed name (without extension) of the merged presentation
pub const OUTPUT_STEM: &str = "COMPLETE_PRESENTATION";

/// Name of the transient audio intermediate written next to the output
pub const TEMP_AUDIO_FILE: &str = "temp-audio.m4a";

/// Time specification - represents time in seconds with fractional precision
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
#[serde(transparent)]
pub struct TimeSpec {
    pub seconds: f64,
}

impl TimeSpec {
    /// Create a new TimeSpec from seconds
    pub fn from_seconds(seconds: f64) -> Self {
        Self { seconds }
    }

    pub fn as_seconds(&self) -> f64 {
        self.seconds
    }

    pub fn as_minutes(&self) -> f64 {
        self.seconds / 60.0
    }

    /// Format as H:MM:SS.mmm or M:SS.mmm
    pub fn format_hms(&self) -> String {
        let total_millis = (self.seconds.max(0.0) * 1000.0).round() as u64;
        let hours = total_millis / 3_600_000;
        let minutes = (total_millis % 3_600_000) / 60_000;
        let seconds = (total_millis % 60_000) / 1000;
        let milliseconds = total_millis % 1000;

        if hours > 0 {
            format!("{}:{:02}:{:02}.{:03}", hours, minutes, seconds, milliseconds)
        } else {
            format!("{}:{:02}.{:03}", minutes, seconds, milliseconds)
        }
    }
}

impl fmt::Display for TimeSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_hms())
    }
}

impl std::iter::Sum for TimeSpec {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        Self::from_seconds(iter.map(|t| t.seconds).sum())
    }
}

/// Rendering tier label, e.g. `480p15`, `720p30` or `1080p60`.
///
/// The label is used verbatim as a directory name in the scene path template,
/// so it must be a single path component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct QualityProfile {
    label: String,
}

impl QualityProfile {
    /// Profile used when the caller supplies none
    pub const DEFAULT_LABEL: &'static str = "1080p60";

    /// Parse a quality label
    pub fn parse(label: &str) -> Result<Self, DomainError> {
        let trimmed = label.trim();
        if trimmed.is_empty() {
            return Err(DomainError::BadArgs("Quality profile cannot be empty".to_string()));
        }
        if trimmed.contains(['/', '\\']) || trimmed == "." || trimmed == ".." {
            return Err(DomainError::BadArgs(format!(
                "Quality profile must be a single directory name, got: {}",
                trimmed
            )));
        }
        Ok(Self { label: trimmed.to_string() })
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Export frame rate for this profile: 60, 30, or 15 for anything else
    pub fn frame_rate(&self) -> u32 {
        if self.label.contains("60") {
            60
        } else if self.label.contains("30") {
            30
        } else {
            15
        }
    }

    /// `manim` quality flag that renders into this profile's directory
    pub fn manim_flag(&self) -> &'static str {
        match self.label.as_str() {
            "480p15" => "-ql",
            "720p30" => "-qm",
            "1080p60" => "-qh",
            "1440p60" => "-qp",
            "2160p60" => "-qk",
            _ => "-qh",
        }
    }
}

impl Default for QualityProfile {
    fn default() -> Self {
        Self { label: Self::DEFAULT_LABEL.to_string() }
    }
}

impl fmt::Display for QualityProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label)
    }
}

/// One entry of the fixed scene catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSpec {
    /// 1-based position in the final presentation
    pub index: usize,
    pub directory: &'static str,
    pub class_name: &'static str,
    pub script: &'static str,
}

/// The presentation scenes in playback order
pub const SCENE_CATALOG: [SceneSpec; 4] = [
    SceneSpec {
        index: 1,
        directory: "scene1",
        class_name: "IntroSceneWithTitles",
        script: "scenes/scene1.py",
    },
    SceneSpec {
        index: 2,
        directory: "scene2",
        class_name: "CircleDetectionScene",
        script: "scenes/scene2.py",
    },
    SceneSpec {
        index: 3,
        directory: "scene3",
        class_name: "PolarTransformScene",
        script: "scenes/scene3.py",
    },
    SceneSpec {
        index: 4,
        directory: "scene4",
        class_name: "ResultsScene",
        script: "scenes/scene4.py",
    },
];

impl SceneSpec {
    /// Look up a catalog entry by its 1-based index
    pub fn by_index(index: usize) -> Option<&'static SceneSpec> {
        SCENE_CATALOG.iter().find(|scene| scene.index == index)
    }

    /// Expected rendered file: `<media_root>/videos/<dir>/<quality>/<Class>.<ext>`
    pub fn path_for(&self, media_root: &Path, quality: &QualityProfile, extension: &str) -> PathBuf {
        media_root
            .join("videos")
            .join(self.directory)
            .join(quality.label())
            .join(format!("{}.{}", self.class_name, extension))
    }

    /// Command that renders this scene at the given quality
    pub fn render_command(&self, quality: &QualityProfile) -> String {
        format!("manim -p{} {} {}", &quality.manim_flag()[1..], self.script, self.class_name)
    }
}

/// A scene together with the file it is expected at
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SceneReference {
    pub index: usize,
    pub path: PathBuf,
}

impl SceneReference {
    /// Resolve the ordered scene references for one run
    pub fn resolve_all(media_root: &Path, quality: &QualityProfile, extension: &str) -> Vec<Self> {
        SCENE_CATALOG
            .iter()
            .map(|scene| Self {
                index: scene.index,
                path: scene.path_for(media_root, quality, extension),
            })
            .collect()
    }

    pub fn spec(&self) -> Option<&'static SceneSpec> {
        SceneSpec::by_index(self.index)
    }
}

/// Video stream information
#[derive(Debug, Clone, PartialEq)]
pub struct VideoStreamInfo {
    pub codec: String,
    pub width: u32,
    pub height: u32,
    pub frame_rate: f64,
}

impl VideoStreamInfo {
    /// Create new video stream info with validation
    pub fn new(codec: String, width: u32, height: u32, frame_rate: f64) -> Result<Self, DomainError> {
        if width == 0 || height == 0 {
            return Err(DomainError::BadArgs("Video dimensions cannot be zero".to_string()));
        }
        if frame_rate <= 0.0 || !frame_rate.is_finite() {
            return Err(DomainError::BadArgs("Frame rate must be positive".to_string()));
        }
        Ok(Self { codec, width, height, frame_rate })
    }
}

/// Audio stream information
#[derive(Debug, Clone, PartialEq)]
pub struct AudioStreamInfo {
    pub codec: String,
    pub sample_rate: u32,
    pub channels: u32,
}

/// Probed information about one media file
#[derive(Debug, Clone, PartialEq)]
pub struct MediaInfo {
    pub format: String,
    pub duration: TimeSpec,
    pub video: Option<VideoStreamInfo>,
    pub audio: Option<AudioStreamInfo>,
}

impl MediaInfo {
    pub fn has_audio(&self) -> bool {
        self.audio.is_some()
    }
}

/// Open, read-only handle on one rendered scene.
///
/// The file stays open for as long as the handle lives and is closed when the
/// handle is dropped.
#[derive(Debug)]
pub struct ClipHandle {
    reference: SceneReference,
    info: MediaInfo,
    video: VideoStreamInfo,
    _file: File,
}

impl ClipHandle {
    /// Open a scene file whose media information has already been probed
    pub fn open(reference: SceneReference, info: MediaInfo) -> Result<Self, DomainError> {
        if info.duration.seconds.is_nan() || info.duration.seconds <= 0.0 {
            return Err(DomainError::ProcessingError(format!(
                "Scene {} has no playable duration: {}",
                reference.index,
                reference.path.display()
            )));
        }
        let video = info.video.clone().ok_or_else(|| {
            DomainError::ProcessingError(format!(
                "Scene {} has no video stream: {}",
                reference.index,
                reference.path.display()
            ))
        })?;
        let file = File::open(&reference.path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => {
                DomainError::FileNotFound(reference.path.display().to_string())
            }
            _ => DomainError::FsFail(format!("Failed to open {}: {}", reference.path.display(), e)),
        })?;

        debug!(scene = reference.index, path = %reference.path.display(), "Opened clip handle");
        Ok(Self { reference, info, video, _file: file })
    }

    pub fn reference(&self) -> &SceneReference {
        &self.reference
    }

    pub fn path(&self) -> &Path {
        &self.reference.path
    }

    pub fn video(&self) -> &VideoStreamInfo {
        &self.video
    }

    pub fn duration(&self) -> TimeSpec {
        self.info.duration
    }

    pub fn has_audio(&self) -> bool {
        self.info.has_audio()
    }
}

impl Drop for ClipHandle {
    fn drop(&mut self) {
        debug!(scene = self.reference.index, "Released clip handle");
    }
}

/// Frame size every clip is composited onto
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

/// All clips of one run joined in scene order.
///
/// Owns the clip handles; dropping the sequence releases every clip.
#[derive(Debug)]
pub struct CompositeSequence {
    clips: Vec<ClipHandle>,
    canvas: Canvas,
    frame_rate: u32,
}

impl CompositeSequence {
    pub(crate) fn from_parts(clips: Vec<ClipHandle>, canvas: Canvas, frame_rate: u32) -> Self {
        Self { clips, canvas, frame_rate }
    }

    pub fn clips(&self) -> &[ClipHandle] {
        &self.clips
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn frame_rate(&self) -> u32 {
        self.frame_rate
    }

    pub fn total_duration(&self) -> TimeSpec {
        self.clips.iter().map(ClipHandle::duration).sum()
    }

    /// True when at least one clip carries an audio track
    pub fn has_audio(&self) -> bool {
        self.clips.iter().any(ClipHandle::has_audio)
    }
}

impl Drop for CompositeSequence {
    fn drop(&mut self) {
        debug!(clips = self.clips.len(), "Released composite sequence");
    }
}

/// Everything the exporter needs besides the sequence itself
#[derive(Debug, Clone, PartialEq)]
pub struct ExportSettings {
    pub output_path: PathBuf,
    pub temp_audio_path: PathBuf,
    pub frame_rate: u32,
    pub video_codec: String,
    pub audio_codec: String,
    pub preset: String,
    pub threads: usize,
}

/// Result of a finished export
#[derive(Debug, Clone, PartialEq)]
pub struct ExportReport {
    pub output_path: PathBuf,
    pub audio_muxed: bool,
}

/// Resolved tool configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergerConfig {
    /// Root of the rendered media tree (`<root>/videos/sceneN/...`)
    pub media_root: PathBuf,
    /// Directory the merged presentation is written to
    pub output_dir: PathBuf,
    /// Container extension of scenes and output
    pub extension: String,
    /// Quality used when none is given on the command line
    pub default_quality: String,
    pub video_codec: String,
    pub audio_codec: String,
    pub preset: String,
    pub threads: usize,
    pub ffmpeg_path: PathBuf,
    pub ffprobe_path: PathBuf,
}

impl Default for MergerConfig {
    fn default() -> Self {
        Self {
            media_root: PathBuf::from("media"),
            output_dir: PathBuf::from("."),
            extension: "mp4".to_string(),
            default_quality: QualityProfile::DEFAULT_LABEL.to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "medium".to_string(),
            threads: 4,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            ffprobe_path: PathBuf::from("ffprobe"),
        }
    }
}

impl MergerConfig {
    /// Validate configuration values
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.threads == 0 {
            return Err(DomainError::BadArgs("Thread count must be at least 1".to_string()));
        }
        let extension = self.extension.trim_start_matches('.');
        if extension.is_empty() || extension.contains(['/', '\\']) {
            return Err(DomainError::BadArgs(format!(
                "Invalid container extension: {:?}",
                self.extension
            )));
        }
        for (key, value) in [
            ("video_codec", &self.video_codec),
            ("audio_codec", &self.audio_codec),
            ("preset", &self.preset),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::BadArgs(format!("{} cannot be empty", key)));
            }
        }
        QualityProfile::parse(&self.default_quality)?;
        Ok(())
    }

    /// Extension without a leading dot
    pub fn extension(&self) -> &str {
        self.extension.trim_start_matches('.')
    }

    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(format!("{}.{}", OUTPUT_STEM, self.extension()))
    }

    pub fn temp_audio_path(&self) -> PathBuf {
        self.output_dir.join(TEMP_AUDIO_FILE)
    }
}

/// Request for one merge run
#[derive(Debug, Clone, PartialEq)]
pub struct MergeRequest {
    pub quality: QualityProfile,
}

impl MergeRequest {
    pub fn new(quality: QualityProfile) -> Self {
        Self { quality }
    }
}

/// Scenes that have not been rendered yet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MissingScenes {
    pub quality: QualityProfile,
    /// Missing files, in scene order
    pub missing: Vec<SceneReference>,
    /// One render command per missing scene
    pub render_commands: Vec<String>,
}

impl MissingScenes {
    pub fn count(&self) -> usize {
        self.missing.len()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipSummary {
    pub index: usize,
    pub path: PathBuf,
    pub duration: TimeSpec,
}

/// Outcome of a successful merge
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MergeSummary {
    pub quality: QualityProfile,
    pub frame_rate: u32,
    pub canvas: Canvas,
    pub clips: Vec<ClipSummary>,
    pub total_duration: TimeSpec,
    pub output_path: PathBuf,
    pub output_size: u64,
    /// Duration measured on the written file, when it could be probed
    pub output_duration: Option<TimeSpec>,
    /// False when no clip had audio and the output carries none
    pub audio_muxed: bool,
}

/// Structured result of one merge run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MergeOutcome {
    MissingScenes(MissingScenes),
    Merged(MergeSummary),
}

#[cfg(test)]
mod tests;
