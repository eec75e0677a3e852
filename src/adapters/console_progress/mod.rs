// Console progress adapter - Human-readable progress lines for the operator

use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use crate::domain::model::*;
use crate::ports::*;
use crate::utils::Utils;

/// Prints pipeline progress to stdout (or any writer)
pub struct ConsoleProgressAdapter {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleProgressAdapter {
    /// Create adapter writing to stdout
    pub fn new() -> Self {
        Self::with_writer(Box::new(io::stdout()))
    }

    pub fn with_writer(out: Box<dyn Write + Send>) -> Self {
        Self { out: Mutex::new(out) }
    }

    fn emit(&self, text: &str) {
        // Write failures are ignored.
        if let Ok(mut out) = self.out.lock() {
            let _ = writeln!(out, "{}", text);
            let _ = out.flush();
        }
    }
}

impl Default for ConsoleProgressAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressPort for ConsoleProgressAdapter {
    fn on_check_start(&self, _quality: &QualityProfile) {
        self.emit("Checking scene files...");
    }

    fn on_scene_checked(&self, reference: &SceneReference, found: bool) {
        if found {
            self.emit(&format!("  ✓ Found: {}", reference.path.display()));
        } else {
            self.emit(&format!("  ❌ Missing: {}", reference.path.display()));
        }
    }

    fn on_missing_scenes(&self, report: &MissingScenes) {
        self.emit(&format!("\n⚠️  {} file(s) missing!", report.count()));
        self.emit("Please render the missing scenes first using:");
        for command in &report.render_commands {
            self.emit(&format!("  {}", command));
        }
    }

    fn on_clip_loaded(&self, position: usize, total: usize, duration: TimeSpec) {
        if position == 1 {
            self.emit("\nLoading video clips...");
        }
        self.emit(&format!("  Loading scene {}/{}...", position, total));
        self.emit(&format!("    Duration: {:.2}s", duration.as_seconds()));
    }

    fn on_sequence_ready(&self, total_duration: TimeSpec) {
        self.emit("\nMerging videos...");
        self.emit(&format!(
            "  Total duration: {:.2}s ({:.2} minutes)",
            total_duration.as_seconds(),
            total_duration.as_minutes()
        ));
    }

    fn on_export_start(&self, output_path: &Path, frame_rate: u32) {
        self.emit(&format!("\nExporting to {} at {} fps...", output_path.display(), frame_rate));
    }

    fn on_export_complete(&self, summary: &MergeSummary) {
        self.emit(&format!(
            "\n✅ Success! Complete presentation saved as: {}",
            summary.output_path.display()
        ));
        self.emit(&format!(
            "   File size: {} ({} bytes)",
            Utils::format_file_size(summary.output_size),
            summary.output_size
        ));
    }
}

/// Progress adapter that discards every event
#[derive(Debug, Default, Clone, Copy)]
pub struct SilentProgressAdapter;

impl ProgressPort for SilentProgressAdapter {
    fn on_check_start(&self, _quality: &QualityProfile) {}
    fn on_scene_checked(&self, _reference: &SceneReference, _found: bool) {}
    fn on_missing_scenes(&self, _report: &MissingScenes) {}
    fn on_clip_loaded(&self, _position: usize, _total: usize, _duration: TimeSpec) {}
    fn on_sequence_ready(&self, _total_duration: TimeSpec) {}
    fn on_export_start(&self, _output_path: &Path, _frame_rate: u32) {}
    fn on_export_complete(&self, _summary: &MergeSummary) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::Arc;

    /// Writer that shares its buffer with the test
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn text(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    #[test]
    fn test_missing_report_lines() {
        let buffer = SharedBuffer::default();
        let progress = ConsoleProgressAdapter::with_writer(Box::new(buffer.clone()));
        let quality = QualityProfile::parse("480p15").unwrap();
        let found = SceneReference { index: 1, path: PathBuf::from("a/IntroSceneWithTitles.mp4") };
        let missing = SceneReference { index: 3, path: PathBuf::from("c/PolarTransformScene.mp4") };

        progress.on_check_start(&quality);
        progress.on_scene_checked(&found, true);
        progress.on_scene_checked(&missing, false);
        progress.on_missing_scenes(&MissingScenes {
            quality,
            missing: vec![missing.clone()],
            render_commands: vec!["manim -pql scenes/scene3.py PolarTransformScene".to_string()],
        });

        let text = buffer.text();
        assert!(text.contains("✓ Found: a/IntroSceneWithTitles.mp4"));
        assert!(text.contains("❌ Missing: c/PolarTransformScene.mp4"));
        assert!(text.contains("1 file(s) missing!"));
        assert!(text.contains("  manim -pql scenes/scene3.py PolarTransformScene"));
    }

    #[test]
    fn test_load_and_export_lines() {
        let buffer = SharedBuffer::default();
        let progress = ConsoleProgressAdapter::with_writer(Box::new(buffer.clone()));

        progress.on_clip_loaded(1, 4, TimeSpec::from_seconds(12.345));
        progress.on_sequence_ready(TimeSpec::from_seconds(90.0));
        progress.on_export_start(Path::new("COMPLETE_PRESENTATION.mp4"), 60);

        let text = buffer.text();
        assert!(text.contains("Loading video clips..."));
        assert!(text.contains("Loading scene 1/4..."));
        assert!(text.contains("Duration: 12.35s") || text.contains("Duration: 12.34s"));
        assert!(text.contains("Total duration: 90.00s (1.50 minutes)"));
        assert!(text.contains("Exporting to COMPLETE_PRESENTATION.mp4 at 60 fps..."));
    }
}
