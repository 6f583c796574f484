//! Swagger document loading
//!
//! Loaders only fetch bytes; [`parser::SwaggerParser`] builds the
//! [`SpecDocument`] from the decoded JSON value.

pub mod composite_loader;
pub mod document;
pub mod file_loader;
pub mod http_loader;
pub mod parser;
pub mod types;

use async_trait::async_trait;
use serde_json::Value as JsonValue;

pub use composite_loader::CompositeSpecLoader;
pub use document::SpecDocument;
pub use file_loader::FileSpecLoader;
pub use http_loader::HttpSpecLoader;
pub use parser::SwaggerParser;

use crate::core::error::{Error, Result};

/// Loads a spec document from a source (path or URL)
#[async_trait]
pub trait SpecLoader: Send + Sync {
    async fn load(&self, source: &str) -> Result<SpecDocument>;
}

/// Wire format hint derived from a file extension or content type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Format {
    Json,
    Yaml,
    Unknown,
}

/// Decode `content` and hand it to the parser
pub(crate) fn parse_content(content: &str, source: &str, format: Format) -> Result<SpecDocument> {
    let value: JsonValue = match format {
        Format::Json => serde_json::from_str(content)?,
        Format::Yaml => serde_yaml::from_str(content)?,
        // Try JSON first, then YAML
        Format::Unknown => serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| Error::spec(format!("{source}: failed to parse document: {e}")))?,
    };
    SwaggerParser::new(value, source).parse()
}

pub(crate) fn format_from_extension(source: &str) -> Format {
    if source.ends_with(".json") {
        Format::Json
    } else if source.ends_with(".yaml") || source.ends_with(".yml") {
        Format::Yaml
    } else {
        Format::Unknown
    }
}
