//! Response envelope applied to handler results at request time.
//!
//! The schemas produced by [`crate::rewrite`] document exactly what this
//! module serializes, so changes to the wire shape here must be reflected in
//! [`crate::rewrite::envelope`].

pub mod page;
pub mod response;

pub use page::{Page, PageInfo};
pub use response::{
    ApiResponse, DEFAULT_EXCLUDED_PREFIXES, IntoEnvelope, ResponseWrapper, WrappedBody,
};
