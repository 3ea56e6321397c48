//! Writes rewritten documents to a file or stdout

use std::path::Path;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;

use super::document::OpenApiDocument;
use crate::application::DocumentOutput;
use crate::core::error::Result;

/// Output target meaning "standard output"
pub const STDOUT_TARGET: &str = "-";

/// Serialize a document as YAML for `.yaml`/`.yml` targets, pretty JSON otherwise
pub fn render_document(document: &OpenApiDocument, target: &str) -> Result<String> {
    if target.ends_with(".yaml") || target.ends_with(".yml") {
        Ok(serde_yaml::to_string(document.as_json())?)
    } else {
        let mut rendered = serde_json::to_string_pretty(document.as_json())?;
        rendered.push('\n');
        Ok(rendered)
    }
}

/// Writes documents to the filesystem, or to stdout for `-`
pub struct FileSystemDocumentOutput;

impl FileSystemDocumentOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileSystemDocumentOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DocumentOutput for FileSystemDocumentOutput {
    async fn write_document(&self, document: &OpenApiDocument, target: &str) -> Result<()> {
        let rendered = render_document(document, target)?;

        if target == STDOUT_TARGET {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(rendered.as_bytes()).await?;
            stdout.flush().await?;
            return Ok(());
        }

        if let Some(parent) = Path::new(target).parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        fs::write(target, rendered).await?;
        tracing::info!(output = %target, "Wrote rewritten OpenAPI document");
        Ok(())
    }
}
