use std::sync::Arc;

use crate::adapters::{
    ConsoleProgressAdapter, FfmpegExecAdapter, FfprobeAdapter, FsLocalAdapter, SilentProgressAdapter,
};
use crate::app::merge_interactor::MergeInteractor;
use crate::domain::errors::DomainError;
use crate::domain::model::MergerConfig;
use crate::ports::{ExecutePort, FsPort, ProbePort, ProgressPort};

pub trait AppContainer: Send + Sync {
    fn merge_interactor(&self) -> Arc<MergeInteractor>;
}

pub struct DefaultAppContainer {
    merge_interactor: Arc<MergeInteractor>,
}

impl DefaultAppContainer {
    /// Wire the production adapters for the given configuration
    pub fn new(config: MergerConfig, quiet: bool) -> Result<Self, DomainError> {
        config.validate()?;

        let probe_port = Arc::new(FfprobeAdapter::new(config.ffprobe_path.clone()));
        let execute_port = Arc::new(FfmpegExecAdapter::new(config.ffmpeg_path.clone()));
        let fs_port = Arc::new(FsLocalAdapter::new());
        let progress_port: Arc<dyn ProgressPort> = if quiet {
            Arc::new(SilentProgressAdapter)
        } else {
            Arc::new(ConsoleProgressAdapter::new())
        };

        let merge_interactor = Arc::new(MergeInteractor::new(
            probe_port as Arc<dyn ProbePort>,
            execute_port as Arc<dyn ExecutePort>,
            fs_port as Arc<dyn FsPort>,
            progress_port,
            config,
        ));

        Ok(Self { merge_interactor })
    }
}

impl AppContainer for DefaultAppContainer {
    fn merge_interactor(&self) -> Arc<MergeInteractor> {
        Arc::clone(&self.merge_interactor)
    }
}
