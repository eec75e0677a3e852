// Domain rules - Business logic and policies

use crate::domain::errors::*;
use crate::domain::model::*;

/// Business rules for laying clips of different sizes onto one canvas
pub struct CanvasPlanner;

impl CanvasPlanner {
    /// Smallest canvas that holds every clip unscaled.
    ///
    /// Dimensions are rounded up to even values so the yuv420p output is valid.
    pub fn enclosing(clips: &[ClipHandle]) -> Result<Canvas, DomainError> {
        if clips.is_empty() {
            return Err(DomainError::BadArgs("Cannot compose an empty clip list".to_string()));
        }

        let width = clips.iter().map(|c| c.video().width).max().unwrap_or(0);
        let height = clips.iter().map(|c| c.video().height).max().unwrap_or(0);

        Ok(Canvas {
            width: round_up_even(width),
            height: round_up_even(height),
        })
    }

    /// Join clips in the given order into one composite sequence
    pub fn compose(clips: Vec<ClipHandle>, frame_rate: u32) -> Result<CompositeSequence, DomainError> {
        if frame_rate == 0 {
            return Err(DomainError::BadArgs("Frame rate must be positive".to_string()));
        }
        let canvas = Self::enclosing(&clips)?;
        Ok(CompositeSequence::from_parts(clips, canvas, frame_rate))
    }
}

fn round_up_even(value: u32) -> u32 {
    value + (value % 2)
}

/// Business rules for telling the operator how to produce missing scenes
pub struct RemediationPlanner;

impl RemediationPlanner {
    /// One render command per missing scene, in scene order
    pub fn render_commands(quality: &QualityProfile, missing: &[SceneReference]) -> Vec<String> {
        missing
            .iter()
            .filter_map(SceneReference::spec)
            .map(|scene| scene.render_command(quality))
            .collect()
    }

    pub fn missing_report(quality: &QualityProfile, missing: Vec<SceneReference>) -> MissingScenes {
        let render_commands = Self::render_commands(quality, &missing);
        MissingScenes {
            quality: quality.clone(),
            missing,
            render_commands,
        }
    }
}

/// Business rules for the final export
pub struct ExportPlanner;

impl ExportPlanner {
    /// Encoder settings for a run at the given quality
    pub fn settings(config: &MergerConfig, quality: &QualityProfile) -> ExportSettings {
        ExportSettings {
            output_path: config.output_path(),
            temp_audio_path: config.temp_audio_path(),
            frame_rate: quality.frame_rate(),
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            preset: config.preset.clone(),
            threads: config.threads,
        }
    }
}

/// Business rules for checking the written output
pub struct OutputValidator;

impl OutputValidator {
    /// Slack allowed between the summed clip durations and the measured output,
    /// one output frame plus container rounding
    pub fn tolerance_seconds(frame_rate: u32) -> f64 {
        1.0 / frame_rate.max(1) as f64 + 0.05
    }

    /// True when the measured output is at least as long as the clips it joins
    pub fn covers_clips(total: TimeSpec, output_duration: TimeSpec, frame_rate: u32) -> bool {
        total.seconds <= output_duration.seconds + Self::tolerance_seconds(frame_rate)
    }
}

#[cfg(test)]
mod tests;
