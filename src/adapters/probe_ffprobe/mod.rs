//! FFprobe adapter for media file probing
//!
//! Runs the system `ffprobe` binary with JSON output and maps the first video
//! and audio streams into the domain model.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use tokio::process::Command;
use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// FFprobe-based probe adapter
pub struct FfprobeAdapter {
    binary: PathBuf,
}

impl FfprobeAdapter {
    /// Create new FFprobe adapter using the given executable
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self { binary: binary.into() }
    }
}

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<FfprobeStream>,
    format: Option<FfprobeFormat>,
}

#[derive(Debug, Deserialize)]
struct FfprobeStream {
    codec_type: Option<String>,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
    sample_rate: Option<String>,
    channels: Option<u32>,
    duration: Option<String>,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    format_name: Option<String>,
    duration: Option<String>,
}

/// Parse an ffprobe rational such as `30000/1001`; `0/0` yields `None`
fn parse_rational(value: &str) -> Option<f64> {
    let (num, den) = match value.split_once('/') {
        Some((num, den)) => (num.trim().parse::<f64>().ok()?, den.trim().parse::<f64>().ok()?),
        None => (value.trim().parse::<f64>().ok()?, 1.0),
    };
    if den == 0.0 || num <= 0.0 {
        return None;
    }
    Some(num / den)
}

fn parse_seconds(value: Option<&String>) -> Option<f64> {
    value
        .and_then(|v| v.trim().parse::<f64>().ok())
        .filter(|s| s.is_finite() && *s > 0.0)
}

/// Map `ffprobe -print_format json -show_format -show_streams` output
pub(crate) fn parse_probe_output(json: &str, path: &Path) -> Result<MediaInfo, DomainError> {
    let output: FfprobeOutput = serde_json::from_str(json).map_err(|e| {
        DomainError::ProbeFailed(format!("Unreadable ffprobe output for {}: {}", path.display(), e))
    })?;

    let video = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("video"))
        .map(|s| {
            let frame_rate = s
                .avg_frame_rate
                .as_deref()
                .and_then(parse_rational)
                .or_else(|| s.r_frame_rate.as_deref().and_then(parse_rational))
                .unwrap_or(0.0);
            VideoStreamInfo::new(
                s.codec_name.clone().unwrap_or_default(),
                s.width.unwrap_or(0),
                s.height.unwrap_or(0),
                frame_rate,
            )
        })
        .transpose()
        .map_err(|e| DomainError::ProbeFailed(format!("{}: {}", path.display(), e)))?;

    let audio = output
        .streams
        .iter()
        .find(|s| s.codec_type.as_deref() == Some("audio"))
        .map(|s| AudioStreamInfo {
            codec: s.codec_name.clone().unwrap_or_default(),
            sample_rate: s.sample_rate.as_deref().and_then(|r| r.parse().ok()).unwrap_or(0),
            channels: s.channels.unwrap_or(0),
        });

    let format_duration = output.format.as_ref().and_then(|f| parse_seconds(f.duration.as_ref()));
    let stream_duration = output
        .streams
        .iter()
        .filter_map(|s| parse_seconds(s.duration.as_ref()))
        .fold(None, |acc: Option<f64>, d| Some(acc.map_or(d, |a| a.max(d))));

    let duration = format_duration.or(stream_duration).ok_or_else(|| {
        DomainError::ProbeFailed(format!("Could not determine duration of {}", path.display()))
    })?;

    Ok(MediaInfo {
        format: output
            .format
            .and_then(|f| f.format_name)
            .unwrap_or_else(|| "unknown".to_string()),
        duration: TimeSpec::from_seconds(duration),
        video,
        audio,
    })
}

#[async_trait]
impl ProbePort for FfprobeAdapter {
    async fn probe_media(&self, file_path: &Path) -> Result<MediaInfo, DomainError> {
        debug!(path = %file_path.display(), "Probing media file");

        let output = Command::new(&self.binary)
            .args(["-v", "error", "-print_format", "json", "-show_format", "-show_streams"])
            .arg(file_path)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == ErrorKind::NotFound {
                    DomainError::ResourceUnavailable(format!(
                        "ffprobe executable not found: {}",
                        self.binary.display()
                    ))
                } else {
                    DomainError::ProbeFailed(format!("Failed to run ffprobe: {}", e))
                }
            })?;

        if !output.status.success() {
            return Err(DomainError::ProbeFailed(format!(
                "ffprobe failed on {}: {}",
                file_path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        parse_probe_output(&String::from_utf8_lossy(&output.stdout), file_path)
    }
}
