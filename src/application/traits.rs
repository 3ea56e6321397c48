//! Port interfaces for the application layer

use async_trait::async_trait;

use crate::core::error::Result;
use crate::infrastructure::openapi::OpenApiDocument;

/// Loads OpenAPI documents
#[async_trait]
pub trait OpenApiLoader: Send + Sync {
    /// Load an OpenAPI document from a source
    async fn load(&self, source: &str) -> Result<OpenApiDocument>;
}

/// Writes rewritten documents to their destination
#[async_trait]
pub trait DocumentOutput: Send + Sync {
    /// Write the document to `target`
    async fn write_document(&self, document: &OpenApiDocument, target: &str) -> Result<()>;
}
