//! FFmpeg execution adapter
//!
//! Exports a composite sequence with the system `ffmpeg` binary. Clips are
//! centred on the sequence canvas and resampled to the export frame rate before
//! being concatenated, so sources with different sizes or rates can be joined.
//!
//! Audio is rendered first into a temporary intermediate, which the video pass
//! then muxes in without re-encoding. The intermediate is removed when the
//! export finishes, whether it succeeded or not.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// Sample rate every audio track is normalized to before concatenation
const AUDIO_SAMPLE_RATE: u32 = 44_100;

/// FFmpeg-based execution adapter
pub struct FfmpegExecAdapter {
    binary: PathBuf,
}

impl FfmpegExecAdapter {
    /// Create new FFmpeg adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }

    async fn run(&self, args: Vec<OsString>, pass: &str) -> Result<(), DomainError> {
        debug!(pass, ?args, "Running ffmpeg");

        let output = Command::new(&self.binary)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    DomainError::ResourceUnavailable(format!(
                        "ffmpeg executable not found: {}",
                        self.binary.display()
                    ))
                } else {
                    DomainError::ProcessingError(format!("Failed to run ffmpeg: {}", e))
                }
            })?;

        if !output.status.success() {
            return Err(DomainError::ProcessingError(format!(
                "ffmpeg {} pass failed ({}): {}",
                pass,
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }
}

/// Deletes the audio intermediate when dropped
struct TempAudioGuard {
    path: PathBuf,
}

impl TempAudioGuard {
    fn new(path: PathBuf) -> Self {
        Self { path }
    }

    fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempAudioGuard {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!(path = %self.path.display(), "Removed temporary audio"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %self.path.display(), "Failed to remove temporary audio: {}", e),
        }
    }
}

fn seconds_arg(duration: TimeSpec) -> String {
    format!("{:.6}", duration.as_seconds())
}

/// Filter graph that pads every clip onto the canvas and concatenates the video.
///
/// Each segment is held on its last frame or cut so it lasts exactly the clip
/// duration, keeping it aligned with the matching audio segment.
pub(crate) fn video_filter_graph(sequence: &CompositeSequence) -> String {
    let canvas = sequence.canvas();
    let mut graph = String::new();
    let mut labels = String::new();

    for (i, clip) in sequence.clips().iter().enumerate() {
        graph.push_str(&format!(
            "[{i}:v]pad={w}:{h}:(ow-iw)/2:(oh-ih)/2:color=black,setsar=1,fps={fps},\
             tpad=stop_mode=clone:stop_duration={d},trim=duration={d},setpts=PTS-STARTPTS,\
             format=yuv420p[v{i}];",
            i = i,
            w = canvas.width,
            h = canvas.height,
            fps = sequence.frame_rate(),
            d = seconds_arg(clip.duration()),
        ));
        labels.push_str(&format!("[v{}]", i));
    }

    graph.push_str(&format!("{}concat=n={}:v=1:a=0[outv]", labels, sequence.clips().len()));
    graph
}

/// Filter graph that normalizes each clip's audio to its own duration and
/// concatenates it; clips without audio contribute silence
pub(crate) fn audio_filter_graph(sequence: &CompositeSequence) -> String {
    let mut graph = String::new();
    let mut labels = String::new();

    for (i, clip) in sequence.clips().iter().enumerate() {
        let duration = seconds_arg(clip.duration());
        if clip.has_audio() {
            graph.push_str(&format!(
                "[{i}:a]aresample={rate},aformat=sample_fmts=fltp:channel_layouts=stereo,apad,atrim=0:{d},asetpts=PTS-STARTPTS[a{i}];",
                i = i,
                rate = AUDIO_SAMPLE_RATE,
                d = duration,
            ));
        } else {
            graph.push_str(&format!(
                "anullsrc=r={rate}:cl=stereo,aformat=sample_fmts=fltp,atrim=0:{d},asetpts=PTS-STARTPTS[a{i}];",
                i = i,
                rate = AUDIO_SAMPLE_RATE,
                d = duration,
            ));
        }
        labels.push_str(&format!("[a{}]", i));
    }

    graph.push_str(&format!("{}concat=n={}:v=0:a=1[outa]", labels, sequence.clips().len()));
    graph
}

fn base_args(sequence: &CompositeSequence) -> Vec<OsString> {
    let mut args: Vec<OsString> = ["-hide_banner", "-loglevel", "error", "-nostdin", "-y"]
        .into_iter()
        .map(OsString::from)
        .collect();
    for clip in sequence.clips() {
        args.push("-i".into());
        args.push(clip.path().as_os_str().to_owned());
    }
    args
}

/// Arguments of the audio pass, which writes the temporary intermediate
pub(crate) fn audio_args(sequence: &CompositeSequence, settings: &ExportSettings) -> Vec<OsString> {
    let mut args = base_args(sequence);
    args.push("-filter_complex".into());
    args.push(audio_filter_graph(sequence).into());
    args.extend(["-map", "[outa]", "-c:a"].into_iter().map(OsString::from));
    args.push(settings.audio_codec.clone().into());
    args.push(settings.temp_audio_path.as_os_str().to_owned());
    args
}

/// Arguments of the video pass; `audio` is the intermediate to mux in, if any
pub(crate) fn video_args(
    sequence: &CompositeSequence,
    settings: &ExportSettings,
    audio: Option<&Path>,
) -> Vec<OsString> {
    let mut args = base_args(sequence);
    if let Some(audio) = audio {
        args.push("-i".into());
        args.push(audio.as_os_str().to_owned());
    }

    args.push("-filter_complex".into());
    args.push(video_filter_graph(sequence).into());
    args.extend(["-map", "[outv]"].into_iter().map(OsString::from));

    match audio {
        Some(_) => {
            args.push("-map".into());
            args.push(format!("{}:a", sequence.clips().len()).into());
            args.extend(["-c:a", "copy"].into_iter().map(OsString::from));
        }
        None => args.push("-an".into()),
    }

    args.push("-c:v".into());
    args.push(settings.video_codec.clone().into());
    args.push("-preset".into());
    args.push(settings.preset.clone().into());
    args.push("-threads".into());
    args.push(settings.threads.to_string().into());
    args.push("-r".into());
    args.push(settings.frame_rate.to_string().into());
    args.extend(["-pix_fmt", "yuv420p"].into_iter().map(OsString::from));

    let is_mp4_family = settings
        .output_path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "mp4" | "mov" | "m4v"))
        .unwrap_or(false);
    if is_mp4_family {
        args.extend(["-movflags", "+faststart"].into_iter().map(OsString::from));
    }

    args.push(settings.output_path.as_os_str().to_owned());
    args
}

#[async_trait]
impl ExecutePort for FfmpegExecAdapter {
    async fn export(
        &self,
        sequence: &CompositeSequence,
        settings: &ExportSettings,
    ) -> Result<ExportReport, DomainError> {
        if sequence.clips().is_empty() {
            return Err(DomainError::BadArgs("Nothing to export".to_string()));
        }

        if let Some(parent) = settings.output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::FsFail(format!(
                    "Failed to create output directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        info!(
            output = %settings.output_path.display(),
            fps = settings.frame_rate,
            codec = %settings.video_codec,
            threads = settings.threads,
            "Exporting merged sequence"
        );

        let audio = if sequence.has_audio() {
            let guard = TempAudioGuard::new(settings.temp_audio_path.clone());
            self.run(audio_args(sequence, settings), "audio").await?;
            Some(guard)
        } else {
            debug!("No clip carries audio, exporting video only");
            None
        };

        self.run(
            video_args(sequence, settings, audio.as_ref().map(TempAudioGuard::path)),
            "video",
        )
        .await?;

        let audio_muxed = audio.is_some();
        drop(audio);

        Ok(ExportReport {
            output_path: settings.output_path.clone(),
            audio_muxed,
        })
    }
}
