//! Application layer - use cases and the ports they depend on

pub mod rewrite_document;
pub mod traits;

pub use rewrite_document::{
    RewriteDocumentRequest, RewriteDocumentUseCase, RewriteSummary, rewrite_document,
};
pub use traits::{DocumentOutput, OpenApiLoader};
