//! Output service implementations

pub mod filesystem_output;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Serialize;

pub use filesystem_output::*;

use crate::core::error::Result;

/// Whether an existing artifact may be replaced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OverwritePolicy {
    Always,
    /// Keep user edits: an existing file is left untouched
    IfAbsent,
}

/// What happened to one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    Written(PathBuf),
    Skipped(PathBuf),
}

impl WriteOutcome {
    pub fn path(&self) -> &Path {
        match self {
            WriteOutcome::Written(path) | WriteOutcome::Skipped(path) => path,
        }
    }
}

/// Sink for rendered artifacts
#[async_trait]
pub trait OutputService: Send + Sync {
    /// Write `content` to `dir/file_name`, creating `dir` as needed
    async fn write(
        &self,
        dir: &Path,
        file_name: &str,
        content: &[u8],
        policy: OverwritePolicy,
    ) -> Result<WriteOutcome>;
}
