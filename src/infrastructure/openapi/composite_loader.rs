//! Composite OpenAPI loader that picks a strategy from the source

use async_trait::async_trait;

use super::document::OpenApiDocument;
use super::{FileOpenApiLoader, HttpOpenApiLoader};
use crate::application::OpenApiLoader;
use crate::core::error::Result;

/// Dispatches URLs to the HTTP loader and everything else to the file loader
pub struct CompositeOpenApiLoader {
    http: HttpOpenApiLoader,
    file: FileOpenApiLoader,
}

impl CompositeOpenApiLoader {
    pub fn new() -> Result<Self> {
        Ok(Self {
            http: HttpOpenApiLoader::new()?,
            file: FileOpenApiLoader::new(),
        })
    }
}

#[async_trait]
impl OpenApiLoader for CompositeOpenApiLoader {
    async fn load(&self, source: &str) -> Result<OpenApiDocument> {
        if source.starts_with("http://") || source.starts_with("https://") {
            tracing::debug!(source = %source, "CompositeOpenApiLoader: Using HTTP loader");
            self.http.load(source).await
        } else {
            tracing::debug!(source = %source, "CompositeOpenApiLoader: Using file loader");
            self.file.load(source).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::Error;

    #[tokio::test]
    async fn test_composite_uses_file_loader_for_paths() {
        let loader = CompositeOpenApiLoader::new().unwrap();
        let result = loader.load("/nonexistent/openapi.json").await;
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
