//! The `{ data, page }` response envelope and the wrapper that applies it

use serde::{Deserialize, Serialize};

use super::page::{Page, PageInfo};

/// Paths whose responses are sent as-is (documentation UI and the
/// document itself)
pub const DEFAULT_EXCLUDED_PREFIXES: [&str; 2] = ["/swagger-ui", "/v3/api-docs"];

/// Standard `{ "data": T, "page": ... }` response envelope.
///
/// `page` is omitted from the JSON when the payload is not paginated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<PageInfo>,
}

impl<T> ApiResponse<T> {
    pub fn of(data: T) -> Self {
        Self { data, page: None }
    }

    pub fn paged(data: T, page: PageInfo) -> Self {
        Self {
            data,
            page: Some(page),
        }
    }
}

/// Conversion of a handler result into the envelope
pub trait IntoEnvelope {
    type Data: Serialize;

    fn into_envelope(self) -> ApiResponse<Self::Data>;
}

/// Only the page content goes into `data`; the counters go into `page`.
impl<T: Serialize> IntoEnvelope for Page<T> {
    type Data = Vec<T>;

    fn into_envelope(self) -> ApiResponse<Vec<T>> {
        let info = PageInfo::from_page(&self);
        ApiResponse::paged(self.content, info)
    }
}

impl<T: Serialize> IntoEnvelope for ApiResponse<T> {
    type Data = T;

    fn into_envelope(self) -> ApiResponse<T> {
        self
    }
}

impl<T: Serialize> IntoEnvelope for Vec<T> {
    type Data = Vec<T>;

    fn into_envelope(self) -> ApiResponse<Vec<T>> {
        ApiResponse::of(self)
    }
}

/// Body produced by [`ResponseWrapper::wrap`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum WrappedBody<B: IntoEnvelope> {
    /// Excluded path, body sent unchanged
    Passthrough(B),
    Enveloped(ApiResponse<B::Data>),
}

/// Applies the envelope to every handler result outside the excluded paths
#[derive(Debug, Clone)]
pub struct ResponseWrapper {
    excluded_prefixes: Vec<String>,
}

impl Default for ResponseWrapper {
    fn default() -> Self {
        Self::new(DEFAULT_EXCLUDED_PREFIXES)
    }
}

impl ResponseWrapper {
    pub fn new<I, S>(excluded_prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_prefixes: excluded_prefixes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    pub fn wrap<B: IntoEnvelope>(&self, path: &str, body: B) -> WrappedBody<B> {
        if self.is_excluded(path) {
            tracing::trace!(path = %path, "Path excluded from response envelope");
            WrappedBody::Passthrough(body)
        } else {
            WrappedBody::Enveloped(body.into_envelope())
        }
    }
}
