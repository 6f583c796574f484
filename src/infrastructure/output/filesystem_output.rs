//! Filesystem-based output service implementation

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::{OutputService, OverwritePolicy, WriteOutcome};
use crate::core::error::Result;

/// Output service that writes artifacts to the filesystem
#[derive(Debug, Default)]
pub struct FileSystemOutputService;

impl FileSystemOutputService {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl OutputService for FileSystemOutputService {
    async fn write(
        &self,
        dir: &Path,
        file_name: &str,
        content: &[u8],
        policy: OverwritePolicy,
    ) -> Result<WriteOutcome> {
        fs::create_dir_all(dir).await?;
        let path: PathBuf = dir.join(file_name);

        let mut options = fs::OpenOptions::new();
        options.write(true);
        match policy {
            OverwritePolicy::Always => options.create(true).truncate(true),
            OverwritePolicy::IfAbsent => options.create_new(true),
        };

        let mut file = match options.open(&path).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                tracing::info!(path = %path.display(), "skipped (already exists)");
                return Ok(WriteOutcome::Skipped(path));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(content).await?;
        file.flush().await?;

        tracing::info!(path = %path.display(), bytes = content.len(), "wrote artifact");
        Ok(WriteOutcome::Written(path))
    }
}
