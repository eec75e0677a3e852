// Unit tests for business rules

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use tempfile::TempDir;

    use crate::domain::model::*;
    use crate::domain::rules::*;

    fn open_clip(dir: &TempDir, index: usize, width: u32, height: u32, duration: f64) -> ClipHandle {
        let path = dir.path().join(format!("scene{}.mp4", index));
        std::fs::write(&path, b"fake").unwrap();
        let info = MediaInfo {
            format: "mp4".to_string(),
            duration: TimeSpec::from_seconds(duration),
            video: Some(VideoStreamInfo::new("h264".to_string(), width, height, 30.0).unwrap()),
            audio: None,
        };
        ClipHandle::open(SceneReference { index, path }, info).unwrap()
    }

    #[test]
    fn test_canvas_encloses_largest_clip() {
        let dir = TempDir::new().unwrap();
        let clips = vec![
            open_clip(&dir, 1, 1280, 720, 1.0),
            open_clip(&dir, 2, 1920, 1080, 1.0),
            open_clip(&dir, 3, 1080, 1920, 1.0),
        ];

        let canvas = CanvasPlanner::enclosing(&clips).unwrap();
        assert_eq!(canvas, Canvas { width: 1920, height: 1920 });
    }

    #[test]
    fn test_canvas_rounds_odd_sizes_up() {
        let dir = TempDir::new().unwrap();
        let clips = vec![open_clip(&dir, 1, 853, 479, 1.0)];

        let canvas = CanvasPlanner::enclosing(&clips).unwrap();
        assert_eq!(canvas, Canvas { width: 854, height: 480 });
    }

    #[test]
    fn test_compose_keeps_order_and_totals_duration() {
        let dir = TempDir::new().unwrap();
        let clips = vec![
            open_clip(&dir, 1, 640, 480, 10.25),
            open_clip(&dir, 2, 640, 480, 20.5),
            open_clip(&dir, 3, 640, 480, 5.0),
            open_clip(&dir, 4, 640, 480, 7.75),
        ];

        let sequence = CanvasPlanner::compose(clips, 15).unwrap();
        let order: Vec<usize> = sequence.clips().iter().map(|c| c.reference().index).collect();
        assert_eq!(order, vec![1, 2, 3, 4]);
        assert!((sequence.total_duration().seconds - 43.5).abs() < 1e-9);
        assert_eq!(sequence.frame_rate(), 15);
        assert!(!sequence.has_audio());
    }

    #[test]
    fn test_compose_rejects_empty_input() {
        assert!(CanvasPlanner::compose(Vec::new(), 30).is_err());
    }

    #[test]
    fn test_render_commands_follow_missing_order() {
        let quality = QualityProfile::parse("720p30").unwrap();
        let missing = vec![
            SceneReference { index: 2, path: PathBuf::from("b.mp4") },
            SceneReference { index: 4, path: PathBuf::from("d.mp4") },
        ];

        let report = RemediationPlanner::missing_report(&quality, missing);
        assert_eq!(report.count(), 2);
        assert_eq!(
            report.render_commands,
            vec![
                "manim -pqm scenes/scene2.py CircleDetectionScene".to_string(),
                "manim -pqm scenes/scene4.py ResultsScene".to_string(),
            ]
        );
    }

    #[test]
    fn test_export_settings_from_config() {
        let config = MergerConfig {
            output_dir: PathBuf::from("out"),
            threads: 8,
            ..MergerConfig::default()
        };
        let quality = QualityProfile::parse("720p30").unwrap();

        let settings = ExportPlanner::settings(&config, &quality);
        assert_eq!(settings.output_path, Path::new("out/COMPLETE_PRESENTATION.mp4"));
        assert_eq!(settings.temp_audio_path, Path::new("out/temp-audio.m4a"));
        assert_eq!(settings.frame_rate, 30);
        assert_eq!(settings.video_codec, "libx264");
        assert_eq!(settings.audio_codec, "aac");
        assert_eq!(settings.preset, "medium");
        assert_eq!(settings.threads, 8);
    }

    #[test]
    fn test_output_covers_clips() {
        let total = TimeSpec::from_seconds(60.0);
        assert!(OutputValidator::covers_clips(total, TimeSpec::from_seconds(60.0), 30));
        assert!(OutputValidator::covers_clips(total, TimeSpec::from_seconds(59.98), 30));
        assert!(!OutputValidator::covers_clips(total, TimeSpec::from_seconds(55.0), 30));
    }
}
