//! envelope-docs
//!
//! Keeps generated OpenAPI documents in line with a service that wraps every
//! handler result in a `{ "data": ..., "page": ... }` envelope.
//!
//! - [`rewrite`] replaces each operation's response schemas with the
//!   envelope shape, based on the handler's declared return type.
//! - [`envelope`] is the request-time wrapper whose output those schemas
//!   describe.
//! - [`infrastructure`] loads, edits and writes OpenAPI documents, and
//!   [`application`] ties a whole documentation pass together.
#![deny(unsafe_code)]

pub mod application;
pub mod core;
pub mod envelope;
pub mod infrastructure;
pub mod rewrite;
pub mod schema;

pub use crate::core::error::{Error, Result};
pub use rewrite::{OperationDescriptor, ReturnKind, ReturnTypeInfo, SchemaRewriter};
pub use schema::{Schema, SchemaRegistry};
