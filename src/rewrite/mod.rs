//! Envelope rewriting of operation response schemas
//!
//! For each documented operation the rewriter takes the declared return type
//! and the schemas the documentation generator produced for its responses,
//! and replaces each schema with the `{ data, page }` shape that the
//! response wrapper actually sends.

pub mod descriptor;
pub mod envelope;
pub mod rewriter;

pub use descriptor::{
    ContentSchemas, OperationDescriptor, ReturnKind, ReturnShape, ReturnTypeInfo, SchemaName,
    SchemaReplacement, simple_name,
};
pub use envelope::{build_data_schema, build_envelope, build_page_schema, page_placeholder};
pub use rewriter::SchemaRewriter;
