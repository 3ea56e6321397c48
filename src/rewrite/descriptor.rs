//! Inputs of the rewriter: the documented operation and its return type

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::envelope::{ApiResponse, Page};
use crate::schema::Schema;

/// How the handler's declared result type is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReturnKind {
    /// A plain object
    #[default]
    Single,
    /// A list or array of items
    Collection,
    /// One page of a larger result set
    Paginated,
    /// Already in `{ data, page }` form
    Envelope,
}

impl ReturnKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReturnKind::Single => "single",
            ReturnKind::Collection => "collection",
            ReturnKind::Paginated => "paginated",
            ReturnKind::Envelope => "envelope",
        }
    }
}

impl fmt::Display for ReturnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReturnKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "object" => Ok(ReturnKind::Single),
            "collection" | "list" | "array" => Ok(ReturnKind::Collection),
            "paginated" | "page" => Ok(ReturnKind::Paginated),
            "envelope" => Ok(ReturnKind::Envelope),
            other => Err(Error::config(format!("Unknown return kind: {other}"))),
        }
    }
}

/// Fully resolved description of a handler's declared result type.
///
/// Supplied by the caller, which has the static type at hand; the rewriter
/// only reads it. The element name is always stored in simple form, so it
/// can only be set through [`ReturnTypeInfo::new`] (deserialization included).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "RawReturnType")]
pub struct ReturnTypeInfo {
    pub kind: ReturnKind,
    /// Simple name of the element type argument, when the type is generic
    /// and the argument is known
    #[serde(skip_serializing_if = "Option::is_none")]
    element: Option<String>,
}

#[derive(Deserialize)]
struct RawReturnType {
    #[serde(default)]
    kind: ReturnKind,
    #[serde(default)]
    element: Option<String>,
}

impl From<RawReturnType> for ReturnTypeInfo {
    fn from(raw: RawReturnType) -> Self {
        ReturnTypeInfo::new(raw.kind, raw.element.as_deref())
    }
}

impl ReturnTypeInfo {
    pub fn new(kind: ReturnKind, element: Option<&str>) -> Self {
        Self {
            kind,
            element: element.map(simple_name),
        }
    }

    pub fn single() -> Self {
        Self::new(ReturnKind::Single, None)
    }

    pub fn collection(element: &str) -> Self {
        Self::new(ReturnKind::Collection, Some(element))
    }

    pub fn paginated(element: &str) -> Self {
        Self::new(ReturnKind::Paginated, Some(element))
    }

    /// Paginated type whose element argument was erased
    pub fn paginated_erased() -> Self {
        Self::new(ReturnKind::Paginated, None)
    }

    pub fn envelope() -> Self {
        Self::new(ReturnKind::Envelope, None)
    }

    pub fn is_envelope(&self) -> bool {
        self.kind == ReturnKind::Envelope
    }

    pub fn is_paginated(&self) -> bool {
        self.kind == ReturnKind::Paginated
    }

    /// Element type name with any module or package qualification removed
    pub fn element_name(&self) -> Option<&str> {
        self.element.as_deref().filter(|name| !name.is_empty())
    }
}

/// Strip `a::b::` / `a.b.` qualification and generic arguments
pub fn simple_name(name: &str) -> String {
    let base = name.split('<').next().unwrap_or(name).trim();
    let base = base.rsplit("::").next().unwrap_or(base);
    base.rsplit('.').next().unwrap_or(base).to_string()
}

/// Name under which a type's schema is registered
pub trait SchemaName {
    fn schema_name() -> String;
}

/// Static description of how a handler's return type is documented.
///
/// Implemented for the container types of the envelope runtime so the call
/// site can derive a [`ReturnTypeInfo`] from the handler's declared type.
pub trait ReturnShape {
    fn return_type_info() -> ReturnTypeInfo;
}

impl<T: SchemaName> ReturnShape for Page<T> {
    fn return_type_info() -> ReturnTypeInfo {
        ReturnTypeInfo::paginated(&T::schema_name())
    }
}

impl<T: SchemaName> ReturnShape for Vec<T> {
    fn return_type_info() -> ReturnTypeInfo {
        ReturnTypeInfo::collection(&T::schema_name())
    }
}

impl<T> ReturnShape for ApiResponse<T> {
    fn return_type_info() -> ReturnTypeInfo {
        ReturnTypeInfo::envelope()
    }
}

/// Content type → schema slot of one response
pub type ContentSchemas = BTreeMap<String, Option<Schema>>;

/// One documented API operation
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OperationDescriptor {
    pub path: String,
    pub method: String,
    pub operation_id: Option<String>,
    /// Status code → content schemas
    pub responses: BTreeMap<String, ContentSchemas>,
}

/// Replacement for one `(status, content type)` slot
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaReplacement {
    pub status: String,
    pub content_type: String,
    pub schema: Schema,
}

impl OperationDescriptor {
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_operation_id(mut self, operation_id: impl Into<String>) -> Self {
        self.operation_id = Some(operation_id.into());
        self
    }

    /// Declare a response content slot
    pub fn with_content(
        mut self,
        status: impl Into<String>,
        content_type: impl Into<String>,
        schema: Option<Schema>,
    ) -> Self {
        self.responses
            .entry(status.into())
            .or_default()
            .insert(content_type.into(), schema);
        self
    }

    /// Declare a response with no content at all
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.responses.entry(status.into()).or_default();
        self
    }

    pub fn schema(&self, status: &str, content_type: &str) -> Option<&Schema> {
        self.responses.get(status)?.get(content_type)?.as_ref()
    }

    /// Manifest key used when the operation has no `operationId`
    pub fn route_key(&self) -> String {
        format!("{} {}", self.method.to_uppercase(), self.path)
    }

    /// Human readable label for logs
    pub fn label(&self) -> String {
        match &self.operation_id {
            Some(id) => id.clone(),
            None => self.route_key(),
        }
    }

    /// Substitute replacement schemas; slots that were not declared are ignored
    pub fn apply(&mut self, replacements: Vec<SchemaReplacement>) -> usize {
        let mut applied = 0;
        for replacement in replacements {
            let slot = self
                .responses
                .get_mut(&replacement.status)
                .and_then(|content| content.get_mut(&replacement.content_type));
            match slot {
                Some(slot) => {
                    *slot = Some(replacement.schema);
                    applied += 1;
                }
                None => tracing::debug!(
                    operation = %self.label(),
                    status = %replacement.status,
                    content_type = %replacement.content_type,
                    "Ignoring replacement for an undeclared response slot"
                ),
            }
        }
        applied
    }
}
