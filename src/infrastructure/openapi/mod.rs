//! OpenAPI document loading, editing and writing

pub mod composite_loader;
pub mod document;
pub mod file_loader;
pub mod http_loader;
pub mod writer;

pub use composite_loader::CompositeOpenApiLoader;
pub use document::{HttpMethod, OpenApiDocument};
pub use file_loader::FileOpenApiLoader;
pub use http_loader::HttpOpenApiLoader;
pub use writer::{FileSystemDocumentOutput, STDOUT_TARGET, render_document};
