//! Use case for rewriting a whole OpenAPI document

use std::sync::Arc;

use tracing::{debug, info};

use crate::application::{DocumentOutput, OpenApiLoader};
use crate::core::config::RewriteConfig;
use crate::core::error::Result;
use crate::infrastructure::openapi::OpenApiDocument;
use crate::rewrite::SchemaRewriter;

/// Counters of one documentation pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RewriteSummary {
    /// Operations whose responses were enveloped
    pub rewritten: usize,
    /// Operations declared as already returning an envelope
    pub skipped_envelope: usize,
    /// Operations under an excluded path prefix
    pub skipped_excluded: usize,
    /// Response schema slots replaced in the document
    pub replaced_slots: usize,
}

/// Rewrite every operation of `document` according to `config`
pub fn rewrite_document(document: &mut OpenApiDocument, config: &RewriteConfig) -> RewriteSummary {
    let registry = document.registry();
    let rewriter = SchemaRewriter::new(&registry);
    let mut summary = RewriteSummary::default();

    for mut operation in document.operations() {
        if config.is_excluded(&operation.path) {
            debug!(operation = %operation.label(), "Path excluded from rewrite");
            summary.skipped_excluded += 1;
            continue;
        }

        let return_type = config.return_type_for(&operation);
        let replacements = rewriter.plan(&operation, &return_type);
        if replacements.is_empty() {
            if return_type.is_envelope() {
                summary.skipped_envelope += 1;
            }
            continue;
        }

        operation.apply(replacements);
        summary.replaced_slots += document.apply(&operation);
        summary.rewritten += 1;
    }

    info!(
        rewritten = summary.rewritten,
        skipped_envelope = summary.skipped_envelope,
        skipped_excluded = summary.skipped_excluded,
        replaced_slots = summary.replaced_slots,
        "Rewrote OpenAPI document"
    );
    summary
}

/// Request for [`RewriteDocumentUseCase::execute`]
#[derive(Debug, Clone)]
pub struct RewriteDocumentRequest {
    /// File path or URL of the document
    pub source: String,
    /// File path, or `-` for stdout
    pub target: String,
    pub config: RewriteConfig,
}

/// Load a document, rewrite it, write it out
pub struct RewriteDocumentUseCase {
    loader: Arc<dyn OpenApiLoader>,
    output: Arc<dyn DocumentOutput>,
}

impl RewriteDocumentUseCase {
    pub fn new(loader: Arc<dyn OpenApiLoader>, output: Arc<dyn DocumentOutput>) -> Self {
        Self { loader, output }
    }

    pub async fn execute(&self, request: RewriteDocumentRequest) -> Result<RewriteSummary> {
        let mut document = self.loader.load(&request.source).await?;
        let summary = rewrite_document(&mut document, &request.config);
        self.output.write_document(&document, &request.target).await?;
        Ok(summary)
    }
}
