//! HTTP-based OpenAPI document loader
//!
//! Typically pointed at a running service's `/v3/api-docs` endpoint.

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::document::OpenApiDocument;
use super::file_loader::parse_document;
use crate::application::OpenApiLoader;
use crate::core::error::{Error, Result};

/// Loads OpenAPI documents from HTTP/HTTPS URLs
pub struct HttpOpenApiLoader {
    client: Client,
}

impl HttpOpenApiLoader {
    pub fn new() -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .build()
            .map_err(|e| Error::load(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl OpenApiLoader for HttpOpenApiLoader {
    async fn load(&self, source: &str) -> Result<OpenApiDocument> {
        if !source.starts_with("http://") && !source.starts_with("https://") {
            return Err(Error::load(format!(
                "HttpOpenApiLoader only handles HTTP(S) URLs, got: {source}"
            )));
        }

        let response = self
            .client
            .get(source)
            .send()
            .await
            .map_err(|e| Error::load(format!("Failed to fetch OpenAPI document from {source}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::load(format!("HTTP {status} when fetching {source}")));
        }

        let content_type = response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();

        let content = response
            .text()
            .await
            .map_err(|e| Error::load(format!("Failed to read response body: {e}")))?;

        let document = parse_document(&content, source, &content_type)?;
        tracing::debug!(
            source = %source,
            operations = document.operations().len(),
            "Loaded OpenAPI document over HTTP"
        );
        Ok(document)
    }
}
