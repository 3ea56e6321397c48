//! Builders for the `{ data, page }` envelope schema.
//!
//! The shapes produced here mirror what [`crate::envelope::ResponseWrapper`]
//! puts on the wire: paginated results carry only the page content in
//! `data` plus the four page counters, everything else carries the original
//! payload and a `page` slot that is present but null.

use serde_json::json;

use super::descriptor::ReturnTypeInfo;
use crate::schema::{ArraySchema, ObjectSchema, PrimitiveSchema, Schema, SchemaRegistry};

pub const DATA_PROPERTY: &str = "data";
pub const PAGE_PROPERTY: &str = "page";

/// Page counters with their illustrative example values
pub const PAGE_PROPERTIES: [(&str, i64); 4] = [
    ("currentPage", 1),
    ("totalElement", 3),
    ("size", 5),
    ("totalPages", 1),
];

/// Wrap `original` in the envelope appropriate for `return_type`
pub fn build_envelope(
    original: &Schema,
    return_type: &ReturnTypeInfo,
    registry: &SchemaRegistry,
) -> Schema {
    let page = if return_type.is_paginated() {
        build_page_schema()
    } else {
        page_placeholder()
    };

    ObjectSchema::new()
        .property(DATA_PROPERTY, build_data_schema(original, return_type, registry))
        .property(PAGE_PROPERTY, page)
        .into()
}

/// Schema of the `data` property.
///
/// A paginated type becomes a flat array of references to its element type;
/// when the element type is unknown the original schema is kept.
pub fn build_data_schema(
    original: &Schema,
    return_type: &ReturnTypeInfo,
    registry: &SchemaRegistry,
) -> Schema {
    if !return_type.is_paginated() {
        return original.clone();
    }

    match return_type.element_name() {
        Some(element) => ArraySchema::of(registry.reference_for(element).into()).into(),
        None => {
            tracing::warn!("Paginated return type has no element type, keeping original schema");
            original.clone()
        }
    }
}

/// Fixed schema of the pagination metadata
pub fn build_page_schema() -> Schema {
    PAGE_PROPERTIES
        .iter()
        .fold(ObjectSchema::new(), |object, (name, example)| {
            object.property(*name, PrimitiveSchema::integer().example(json!(example)).into())
        })
        .into()
}

/// Nullable, typeless `page` slot for non-paginated results
pub fn page_placeholder() -> Schema {
    PrimitiveSchema::default().nullable(true).into()
}
