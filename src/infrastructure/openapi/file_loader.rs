//! File-based spec loader

use async_trait::async_trait;
use tokio::fs;

use super::{SpecDocument, SpecLoader, format_from_extension, parse_content};
use crate::core::error::Result;

/// Loads spec documents from local files
#[derive(Debug, Default)]
pub struct FileSpecLoader;

impl FileSpecLoader {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SpecLoader for FileSpecLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument> {
        let content = fs::read_to_string(source).await?;
        parse_content(&content, source, format_from_extension(source))
    }
}
