//! File-based OpenAPI document loader

use async_trait::async_trait;
use serde_json::Value as JsonValue;
use tokio::fs;

use super::document::OpenApiDocument;
use crate::application::OpenApiLoader;
use crate::core::error::{Error, Result};

/// Loads OpenAPI documents from local files
pub struct FileOpenApiLoader;

impl FileOpenApiLoader {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileOpenApiLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode document text as JSON or YAML.
///
/// `source` and `content_type` are only hints; when neither names a format,
/// JSON is tried first, then YAML.
pub(crate) fn parse_document(content: &str, source: &str, content_type: &str) -> Result<OpenApiDocument> {
    let value: JsonValue = if content_type.contains("json") || source.ends_with(".json") {
        serde_json::from_str(content)?
    } else if content_type.contains("yaml") || source.ends_with(".yaml") || source.ends_with(".yml")
    {
        serde_yaml::from_str(content)
            .map_err(|e| Error::load(format!("Failed to parse YAML: {e}")))?
    } else {
        serde_json::from_str(content)
            .or_else(|_| serde_yaml::from_str(content))
            .map_err(|e| Error::load(format!("Failed to parse OpenAPI document: {e}")))?
    };

    OpenApiDocument::from_value(value)
}

#[async_trait]
impl OpenApiLoader for FileOpenApiLoader {
    async fn load(&self, source: &str) -> Result<OpenApiDocument> {
        let content = fs::read_to_string(source).await?;
        let document = parse_document(&content, source, "")?;
        tracing::debug!(
            source = %source,
            operations = document.operations().len(),
            "Loaded OpenAPI document from file"
        );
        Ok(document)
    }
}
