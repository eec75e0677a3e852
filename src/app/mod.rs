// Application layer - Use case interactors

pub mod container;
pub mod merge_interactor;

// Re-export interactors
pub use container::{AppContainer, DefaultAppContainer};
pub use merge_interactor::MergeInteractor;
