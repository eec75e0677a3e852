// Adapters - External system implementations

pub mod console_progress;
pub mod exec_ffmpeg;
pub mod fs_local;
pub mod probe_ffprobe;
pub mod toml_config;

// Re-export adapters
pub use console_progress::{ConsoleProgressAdapter, SilentProgressAdapter};
pub use exec_ffmpeg::FfmpegExecAdapter;
pub use fs_local::FsLocalAdapter;
pub use probe_ffprobe::FfprobeAdapter;
pub use toml_config::TomlConfigAdapter;
