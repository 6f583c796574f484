//! HTTP-based spec loader

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use super::{Format, SpecDocument, SpecLoader, format_from_extension, parse_content};
use crate::core::error::{Error, Result};

/// Loads spec documents from HTTP/HTTPS URLs
pub struct HttpSpecLoader {
    client: Client,
}

impl HttpSpecLoader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()?;

        Ok(Self { client })
    }

    pub fn handles(source: &str) -> bool {
        url::Url::parse(source)
            .map(|url| matches!(url.scheme(), "http" | "https"))
            .unwrap_or(false)
    }
}

#[async_trait]
impl SpecLoader for HttpSpecLoader {
    async fn load(&self, source: &str) -> Result<SpecDocument> {
        if !Self::handles(source) {
            return Err(Error::spec(format!(
                "HttpSpecLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self.client.get(source).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::spec(format!("HTTP {status} when fetching {source}")));
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        let content = response.text().await?;

        let format = if content_type.contains("json") {
            Format::Json
        } else if content_type.contains("yaml") {
            Format::Yaml
        } else {
            format_from_extension(source)
        };

        parse_content(&content, source, format)
    }
}
