//! Schema model and the named-schema registry

pub mod registry;
pub mod types;

pub use registry::SchemaRegistry;
pub use types::{
    ArraySchema, COMPONENTS_SCHEMAS_PREFIX, ObjectSchema, PrimitiveSchema, PrimitiveType,
    ReferenceSchema, Schema,
};
