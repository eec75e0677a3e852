// Local filesystem adapter - File system operations backed by tokio::fs

use std::io::ErrorKind;
use std::path::Path;

use async_trait::async_trait;

use crate::domain::errors::*;
use crate::ports::*;

/// Local filesystem adapter
#[derive(Debug, Default)]
pub struct FsLocalAdapter;

impl FsLocalAdapter {
    /// Create new local filesystem adapter
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FsPort for FsLocalAdapter {
    async fn file_exists(&self, file_path: &Path) -> Result<bool, DomainError> {
        match tokio::fs::metadata(file_path).await {
            Ok(metadata) => Ok(metadata.is_file()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(DomainError::FsFail(format!(
                "Failed to check {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn get_file_size(&self, file_path: &Path) -> Result<u64, DomainError> {
        let metadata = tokio::fs::metadata(file_path).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to get file size of {}: {}", file_path.display(), e))
        })?;
        Ok(metadata.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_file_exists_and_size() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.mp4");
        std::fs::write(&path, vec![0u8; 2048]).unwrap();

        let fs = FsLocalAdapter::new();
        assert!(fs.file_exists(&path).await.unwrap());
        assert_eq!(fs.get_file_size(&path).await.unwrap(), 2048);
    }

    #[tokio::test]
    async fn test_missing_file_and_directories() {
        let dir = tempfile::tempdir().unwrap();
        let fs = FsLocalAdapter::new();

        assert!(!fs.file_exists(&dir.path().join("nope.mp4")).await.unwrap());
        // A directory named like the expected file does not count as a rendered scene
        assert!(!fs.file_exists(dir.path()).await.unwrap());
        assert!(fs.get_file_size(&dir.path().join("nope.mp4")).await.is_err());
    }
}
