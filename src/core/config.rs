//! Rewrite configuration and the return-type manifest.
//!
//! The manifest tells the rewriter what each handler actually returns. It is
//! written in TOML:
//!
//! ```toml
//! default_kind = "single"
//! exclude_path_prefixes = ["/swagger-ui", "/v3/api-docs"]
//!
//! [operations.getCompanyPage]
//! kind = "paginated"
//! element = "CompanyDTO"
//!
//! [operations."GET /company/list"]
//! kind = "collection"
//! element = "CompanyDTO"
//! ```
//!
//! Operations are looked up by `operationId` first, then by `METHOD /path`.
//! Operations missing from the manifest use `default_kind`.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::core::error::{Error, Result};
use crate::envelope::DEFAULT_EXCLUDED_PREFIXES;
use crate::rewrite::{OperationDescriptor, ReturnKind, ReturnTypeInfo};

/// Declared return type of one operation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationReturn {
    pub kind: ReturnKind,
    /// Element type of a collection or page; may be package qualified
    #[serde(default)]
    pub element: Option<String>,
}

impl OperationReturn {
    pub fn to_return_type(&self) -> ReturnTypeInfo {
        ReturnTypeInfo::new(self.kind, self.element.as_deref())
    }
}

/// Configuration of a documentation rewrite pass
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RewriteConfig {
    /// Kind assumed for operations missing from the manifest
    #[serde(default)]
    pub default_kind: ReturnKind,

    /// Operations under these path prefixes are never rewritten
    #[serde(default = "default_excluded_prefixes")]
    pub exclude_path_prefixes: Vec<String>,

    /// Keyed by `operationId` or `METHOD /path`
    #[serde(default)]
    pub operations: BTreeMap<String, OperationReturn>,
}

fn default_excluded_prefixes() -> Vec<String> {
    DEFAULT_EXCLUDED_PREFIXES
        .iter()
        .map(|prefix| prefix.to_string())
        .collect()
}

impl Default for RewriteConfig {
    fn default() -> Self {
        Self {
            default_kind: ReturnKind::default(),
            exclude_path_prefixes: default_excluded_prefixes(),
            operations: BTreeMap::new(),
        }
    }
}

impl RewriteConfig {
    /// Parse a manifest from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a manifest file
    pub async fn load_from_path(path: &Path) -> Result<Self> {
        debug!(manifest_path = %path.display(), "Reading return-type manifest");
        let content = fs::read_to_string(path).await.map_err(|e| {
            Error::config(format!(
                "Failed to read return-type manifest {}: {e}",
                path.display()
            ))
        })?;
        let config = Self::from_toml(&content)?;
        debug!(
            operations = config.operations.len(),
            "Loaded return-type manifest"
        );
        Ok(config)
    }

    /// Register an operation's return type
    pub fn with_operation(
        mut self,
        key: impl Into<String>,
        kind: ReturnKind,
        element: Option<&str>,
    ) -> Self {
        self.operations.insert(
            key.into(),
            OperationReturn {
                kind,
                element: element.map(str::to_string),
            },
        );
        self
    }

    /// Reject entries whose element type cannot be used as a schema name
    fn validate(&self) -> Result<()> {
        for (key, entry) in &self.operations {
            if let Some(element) = &entry.element {
                if element.trim().is_empty() {
                    return Err(Error::config(format!(
                        "Operation '{key}' has an empty element type"
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.exclude_path_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Return type of an operation: by `operationId`, then `METHOD /path`,
    /// then the default kind
    pub fn return_type_for(&self, operation: &OperationDescriptor) -> ReturnTypeInfo {
        let entry = operation
            .operation_id
            .as_deref()
            .and_then(|id| self.operations.get(id))
            .or_else(|| self.operations.get(&operation.route_key()));

        match entry {
            Some(entry) => entry.to_return_type(),
            None => ReturnTypeInfo::new(self.default_kind, None),
        }
    }
}
