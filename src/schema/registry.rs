//! Read-only lookup of registered schema names

use std::collections::BTreeSet;

use serde_json::Value as JsonValue;

use super::types::ReferenceSchema;

/// Names registered under `components.schemas`.
///
/// Built once per documentation pass and only read afterwards, so a single
/// registry can be shared by reference across concurrent rewrites.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    names: BTreeSet<String>,
}

impl SchemaRegistry {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Collect the keys of a `components.schemas` object
    pub fn from_components(schemas: &JsonValue) -> Self {
        let names = schemas
            .as_object()
            .map(|map| map.keys().cloned().collect())
            .unwrap_or_default();
        Self { names }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Reference for a simple type name.
    ///
    /// The pointer is produced even when the name is not registered; the
    /// resulting dangling reference only shows up when the document is
    /// rendered or validated.
    pub fn reference_for(&self, name: &str) -> ReferenceSchema {
        if !self.contains(name) {
            tracing::warn!(schema = %name, "Referencing a schema that is not registered");
        }
        ReferenceSchema::component(name)
    }
}
