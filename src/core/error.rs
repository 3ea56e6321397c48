//! Error handling for the envelope-docs library.
//!
//! This module defines the main error type `Error` used by everything that
//! performs I/O or parses input (document loaders, the writer, the manifest),
//! along with a convenient `Result` type alias. The schema rewriter itself
//! never fails and does not use these types.
//!
//! # Examples
//!
//! ```
//! use envelope_docs::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::openapi("missing 'paths' object"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for envelope-docs operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for envelope-docs operations
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document is not a usable OpenAPI document
    #[error("OpenAPI error: {0}")]
    OpenApi(String),

    /// A document source could not be fetched or decoded
    #[error("OpenAPI loading error: {0}")]
    Load(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new OpenAPI error
    pub fn openapi<S: Into<String>>(msg: S) -> Self {
        Self::OpenApi(msg.into())
    }

    /// Create a new loading error
    pub fn load<S: Into<String>>(msg: S) -> Self {
        Self::Load(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_config_creation() {
        let error = Error::config("unknown return kind");
        assert!(matches!(error, Error::Config(_)));
        assert_eq!(error.to_string(), "Configuration error: unknown return kind");
    }

    #[test]
    fn test_error_openapi_creation() {
        let error = Error::openapi("Missing 'paths' object");
        assert!(matches!(error, Error::OpenApi(_)));
        assert_eq!(error.to_string(), "OpenAPI error: Missing 'paths' object");
    }

    #[test]
    fn test_error_load_creation() {
        let error = Error::load("HTTP 404 when fetching http://localhost/v3/api-docs");
        assert!(matches!(error, Error::Load(_)));
        assert!(error.to_string().starts_with("OpenAPI loading error: HTTP 404"));
    }

    #[test]
    fn test_error_from_io_error() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: Error = io_error.into();
        assert!(matches!(error, Error::Io(_)));
        assert!(error.to_string().contains("I/O error"));
        assert!(error.to_string().contains("File not found"));
    }

    #[test]
    fn test_error_from_serde_json_error() {
        let json_result: std::result::Result<serde_json::Value, _> =
            serde_json::from_str("invalid json");
        let error: Error = json_result.unwrap_err().into();
        assert!(matches!(error, Error::Json(_)));
        assert!(error.to_string().contains("JSON parsing error"));
    }

    #[test]
    fn test_error_from_toml_error() {
        let toml_result: std::result::Result<toml::Value, _> = toml::from_str("= broken");
        let error: Error = toml_result.unwrap_err().into();
        assert!(matches!(error, Error::Toml(_)));
        assert!(error.to_string().contains("TOML parsing error"));
    }
}
