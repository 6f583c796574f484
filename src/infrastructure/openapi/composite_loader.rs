//! Loader dispatching on the shape of the source

use async_trait::async_trait;

use super::{FileSpecLoader, HttpSpecLoader, SpecDocument, SpecLoader};
use crate::core::error::Result;

/// Uses HTTP for `http(s)://` sources and the filesystem otherwise
pub struct CompositeSpecLoader {
    http: HttpSpecLoader,
    file: FileSpecLoader,
}

impl CompositeSpecLoader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpSpecLoader::new()?,
            file: FileSpecLoader::new(),
        })
    }
}

#[async_trait]
impl SpecLoader for CompositeSpecLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument> {
        if HttpSpecLoader::handles(source) {
            tracing::debug!(source, "loading spec over http");
            self.http.load(source).await
        } else {
            tracing::debug!(source, "loading spec from file");
            self.file.load(source).await
        }
    }
}
