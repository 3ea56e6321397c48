//! OpenAPI document adapter
//!
//! Reads operations and their response schemas out of a raw OpenAPI JSON
//! document and writes rewritten schemas back into it. Everything the
//! rewriter does not replace is left exactly as it was loaded.

use serde_json::{Map, Value as JsonValue};

use crate::core::error::{Error, Result};
use crate::rewrite::{ContentSchemas, OperationDescriptor};
use crate::schema::{Schema, SchemaRegistry};

/// HTTP methods that may appear under a path item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
    Delete,
    Options,
    Head,
    Patch,
    Trace,
}

impl HttpMethod {
    /// Get all HTTP methods as an array
    pub fn all() -> &'static [HttpMethod] {
        &[
            HttpMethod::Get,
            HttpMethod::Put,
            HttpMethod::Post,
            HttpMethod::Delete,
            HttpMethod::Options,
            HttpMethod::Head,
            HttpMethod::Patch,
            HttpMethod::Trace,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Put => "put",
            HttpMethod::Post => "post",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
            HttpMethod::Trace => "trace",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A loaded OpenAPI document
#[derive(Debug, Clone, PartialEq)]
pub struct OpenApiDocument {
    json: JsonValue,
}

impl OpenApiDocument {
    /// Wrap a parsed document, checking it has a version and a `paths` object
    pub fn from_value(json: JsonValue) -> Result<Self> {
        let has_version = json
            .get("openapi")
            .or_else(|| json.get("swagger"))
            .and_then(JsonValue::as_str)
            .is_some();
        if !has_version {
            return Err(Error::openapi("Missing OpenAPI version"));
        }
        if !json.get("paths").is_some_and(JsonValue::is_object) {
            return Err(Error::openapi("Missing 'paths' object"));
        }
        Ok(Self { json })
    }

    pub fn as_json(&self) -> &JsonValue {
        &self.json
    }

    pub fn into_json(self) -> JsonValue {
        self.json
    }

    pub fn version(&self) -> Option<&str> {
        self.json
            .get("openapi")
            .or_else(|| self.json.get("swagger"))
            .and_then(JsonValue::as_str)
    }

    pub fn title(&self) -> Option<&str> {
        self.json.get("info")?.get("title")?.as_str()
    }

    /// Registry of the names under `components.schemas`
    pub fn registry(&self) -> SchemaRegistry {
        self.json
            .pointer("/components/schemas")
            .map(SchemaRegistry::from_components)
            .unwrap_or_default()
    }

    /// One descriptor per path and method, in document order
    pub fn operations(&self) -> Vec<OperationDescriptor> {
        let Some(paths) = self.json.get("paths").and_then(JsonValue::as_object) else {
            return Vec::new();
        };

        paths
            .iter()
            .flat_map(|(path, path_item)| {
                HttpMethod::all().iter().filter_map(move |method| {
                    path_item
                        .get(method.as_str())
                        .and_then(JsonValue::as_object)
                        .map(|operation| build_operation(path, *method, operation))
                })
            })
            .collect()
    }

    /// Write every present schema slot of `operation` back into the document.
    ///
    /// Returns the number of slots written. Slots that do not exist in the
    /// document are skipped.
    pub fn apply(&mut self, operation: &OperationDescriptor) -> usize {
        let mut written = 0;
        for (status, content) in &operation.responses {
            for (content_type, slot) in content {
                let Some(schema) = slot else {
                    continue;
                };
                match self.media_type_mut(&operation.path, &operation.method, status, content_type)
                {
                    Some(media_type) => {
                        media_type.insert("schema".to_string(), schema.to_json());
                        written += 1;
                    }
                    None => tracing::debug!(
                        operation = %operation.label(),
                        status = %status,
                        content_type = %content_type,
                        "Response slot not found in document"
                    ),
                }
            }
        }
        written
    }

    fn media_type_mut(
        &mut self,
        path: &str,
        method: &str,
        status: &str,
        content_type: &str,
    ) -> Option<&mut Map<String, JsonValue>> {
        self.json
            .get_mut("paths")?
            .get_mut(path)?
            .get_mut(method)?
            .get_mut("responses")?
            .get_mut(status)?
            .get_mut("content")?
            .get_mut(content_type)?
            .as_object_mut()
    }
}

fn build_operation(
    path: &str,
    method: HttpMethod,
    operation: &Map<String, JsonValue>,
) -> OperationDescriptor {
    let operation_id = operation
        .get("operationId")
        .and_then(JsonValue::as_str)
        .map(str::to_string);

    let responses = operation
        .get("responses")
        .and_then(JsonValue::as_object)
        .map(|responses| {
            responses
                .iter()
                .map(|(status, response)| (status.clone(), extract_content(response)))
                .collect()
        })
        .unwrap_or_default();

    OperationDescriptor {
        path: path.to_string(),
        method: method.to_string(),
        operation_id,
        responses,
    }
}

/// Content schemas of one response object.
///
/// A response given as `$ref` is shared with other operations and is not
/// inlined, so it yields no slots.
fn extract_content(response: &JsonValue) -> ContentSchemas {
    if response.get("$ref").is_some() {
        return ContentSchemas::new();
    }

    response
        .get("content")
        .and_then(JsonValue::as_object)
        .map(|content| {
            content
                .iter()
                .map(|(content_type, media_type)| {
                    let schema = media_type.get("schema").and_then(Schema::from_json);
                    (content_type.clone(), schema)
                })
                .collect()
        })
        .unwrap_or_default()
}
