// Unit tests for domain models

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use crate::domain::errors::*;
    use crate::domain::model::*;

    fn media_info(duration: f64, with_audio: bool) -> MediaInfo {
        MediaInfo {
            format: "mov,mp4,m4a,3gp,3g2,mj2".to_string(),
            duration: TimeSpec::from_seconds(duration),
            video: Some(VideoStreamInfo::new("h264".to_string(), 1920, 1080, 60.0).unwrap()),
            audio: with_audio.then(|| AudioStreamInfo {
                codec: "aac".to_string(),
                sample_rate: 48000,
                channels: 2,
            }),
        }
    }

    #[test]
    fn test_frame_rate_selection() {
        let cases = [
            ("1080p60", 60),
            ("2160p60", 60),
            ("720p30", 30),
            ("480p15", 15),
            ("draft", 15),
            ("30and60", 60),
        ];
        for (label, expected) in cases {
            let quality = QualityProfile::parse(label).unwrap();
            assert_eq!(quality.frame_rate(), expected, "label {}", label);
        }
    }

    #[test]
    fn test_default_quality_is_1080p60() {
        let quality = QualityProfile::default();
        assert_eq!(quality.label(), "1080p60");
        assert_eq!(quality.frame_rate(), 60);
    }

    #[test]
    fn test_quality_parse_rejects_bad_labels() {
        assert!(matches!(QualityProfile::parse(""), Err(DomainError::BadArgs(_))));
        assert!(matches!(QualityProfile::parse("   "), Err(DomainError::BadArgs(_))));
        assert!(QualityProfile::parse("../1080p60").is_err());
        assert!(QualityProfile::parse("..").is_err());
        assert_eq!(QualityProfile::parse(" 720p30 ").unwrap().label(), "720p30");
    }

    #[test]
    fn test_manim_flags() {
        assert_eq!(QualityProfile::parse("480p15").unwrap().manim_flag(), "-ql");
        assert_eq!(QualityProfile::parse("720p30").unwrap().manim_flag(), "-qm");
        assert_eq!(QualityProfile::parse("1080p60").unwrap().manim_flag(), "-qh");
        assert_eq!(QualityProfile::parse("2160p60").unwrap().manim_flag(), "-qk");
        assert_eq!(QualityProfile::parse("custom").unwrap().manim_flag(), "-qh");
    }

    #[test]
    fn test_scene_paths_follow_template() {
        let quality = QualityProfile::parse("480p15").unwrap();
        let references = SceneReference::resolve_all(Path::new("media"), &quality, "mp4");

        let expected: Vec<PathBuf> = [
            "media/videos/scene1/480p15/IntroSceneWithTitles.mp4",
            "media/videos/scene2/480p15/CircleDetectionScene.mp4",
            "media/videos/scene3/480p15/PolarTransformScene.mp4",
            "media/videos/scene4/480p15/ResultsScene.mp4",
        ]
        .iter()
        .map(PathBuf::from)
        .collect();

        let paths: Vec<PathBuf> = references.iter().map(|r| r.path.clone()).collect();
        assert_eq!(paths, expected);
        let indices: Vec<usize> = references.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_render_command() {
        let quality = QualityProfile::default();
        let scene = SceneSpec::by_index(3).unwrap();
        assert_eq!(
            scene.render_command(&quality),
            "manim -pqh scenes/scene3.py PolarTransformScene"
        );
        assert!(SceneSpec::by_index(5).is_none());
    }

    #[test]
    fn test_time_spec_formatting() {
        assert_eq!(TimeSpec::from_seconds(83.5).format_hms(), "1:23.500");
        assert_eq!(TimeSpec::from_seconds(3723.25).to_string(), "1:02:03.250");
        assert_eq!(TimeSpec::from_seconds(90.0).as_minutes(), 1.5);
    }

    #[test]
    fn test_time_spec_sum() {
        let total: TimeSpec = [1.5, 2.25, 3.0]
            .iter()
            .map(|s| TimeSpec::from_seconds(*s))
            .sum();
        assert!((total.seconds - 6.75).abs() < 1e-9);
    }

    #[test]
    fn test_video_stream_validation() {
        assert!(VideoStreamInfo::new("h264".to_string(), 0, 1080, 30.0).is_err());
        assert!(VideoStreamInfo::new("h264".to_string(), 1920, 1080, 0.0).is_err());
        assert!(VideoStreamInfo::new("h264".to_string(), 1920, 1080, 29.97).is_ok());
    }

    #[test]
    fn test_clip_handle_open() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"not really a video").unwrap();
        let reference = SceneReference { index: 1, path: path.clone() };

        let handle = ClipHandle::open(reference.clone(), media_info(12.5, true)).unwrap();
        assert_eq!(handle.path(), path.as_path());
        assert_eq!(handle.duration(), TimeSpec::from_seconds(12.5));
        assert!(handle.has_audio());
        assert_eq!(handle.video().width, 1920);
    }

    #[test]
    fn test_clip_handle_rejects_empty_duration() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"x").unwrap();
        let reference = SceneReference { index: 2, path };

        let result = ClipHandle::open(reference, media_info(0.0, false));
        assert!(matches!(result, Err(DomainError::ProcessingError(_))));
    }

    #[test]
    fn test_clip_handle_requires_video_stream() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, b"x").unwrap();
        let mut info = media_info(4.0, true);
        info.video = None;

        let result = ClipHandle::open(SceneReference { index: 1, path }, info);
        assert!(matches!(result, Err(DomainError::ProcessingError(_))));
    }

    #[test]
    fn test_clip_handle_missing_file() {
        let reference = SceneReference {
            index: 4,
            path: PathBuf::from("/definitely/not/here.mp4"),
        };
        let result = ClipHandle::open(reference, media_info(3.0, false));
        assert!(matches!(result, Err(DomainError::FileNotFound(_))));
    }

    #[test]
    fn test_config_defaults_and_paths() {
        let config = MergerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.output_path(), PathBuf::from("./COMPLETE_PRESENTATION.mp4"));
        assert_eq!(config.temp_audio_path(), PathBuf::from("./temp-audio.m4a"));

        let dotted = MergerConfig {
            extension: ".mov".to_string(),
            output_dir: PathBuf::from("out"),
            ..MergerConfig::default()
        };
        assert_eq!(dotted.output_path(), PathBuf::from("out/COMPLETE_PRESENTATION.mov"));
    }

    #[test]
    fn test_config_validation() {
        let zero_threads = MergerConfig { threads: 0, ..MergerConfig::default() };
        assert!(zero_threads.validate().is_err());

        let no_codec = MergerConfig { video_codec: " ".to_string(), ..MergerConfig::default() };
        assert!(no_codec.validate().is_err());

        let no_ext = MergerConfig { extension: ".".to_string(), ..MergerConfig::default() };
        assert!(no_ext.validate().is_err());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let outcome = MergeOutcome::MissingScenes(MissingScenes {
            quality: QualityProfile::parse("720p30").unwrap(),
            missing: vec![SceneReference { index: 3, path: PathBuf::from("a.mp4") }],
            render_commands: vec!["manim -pqm scenes/scene3.py PolarTransformScene".to_string()],
        });
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "missing_scenes");
        assert_eq!(json["quality"], "720p30");
        assert_eq!(json["missing"][0]["index"], 3);
    }
}
