//! Schema rewriter: replaces response schemas with the envelope shape

use super::descriptor::{OperationDescriptor, ReturnTypeInfo, SchemaReplacement};
use super::envelope::build_envelope;
use crate::schema::SchemaRegistry;

/// Rewrites the response schemas of documented operations.
///
/// Holds only a borrowed, read-only registry; a single rewriter can serve
/// any number of operations, including from several threads.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRewriter<'a> {
    registry: &'a SchemaRegistry,
}

impl<'a> SchemaRewriter<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self { registry }
    }

    /// Compute replacement schemas without touching the operation.
    ///
    /// Returns no replacements for envelope return types and skips every
    /// slot that has no schema.
    pub fn plan(
        &self,
        operation: &OperationDescriptor,
        return_type: &ReturnTypeInfo,
    ) -> Vec<SchemaReplacement> {
        if return_type.is_envelope() {
            tracing::debug!(
                operation = %operation.label(),
                "Return type is already an envelope, leaving responses unchanged"
            );
            return Vec::new();
        }

        let mut replacements = Vec::new();
        for (status, content) in &operation.responses {
            for (content_type, slot) in content {
                let Some(original) = slot else {
                    tracing::debug!(
                        operation = %operation.label(),
                        status = %status,
                        content_type = %content_type,
                        "No schema to wrap"
                    );
                    continue;
                };
                replacements.push(SchemaReplacement {
                    status: status.clone(),
                    content_type: content_type.clone(),
                    schema: build_envelope(original, return_type, self.registry),
                });
            }
        }

        tracing::debug!(
            operation = %operation.label(),
            kind = %return_type.kind,
            slots = replacements.len(),
            "Planned envelope rewrite"
        );
        replacements
    }

    /// Replace every present response schema of `operation` in place.
    /// Returns the number of replaced slots.
    pub fn rewrite(&self, operation: &mut OperationDescriptor, return_type: &ReturnTypeInfo) -> usize {
        let replacements = self.plan(operation, return_type);
        operation.apply(replacements)
    }
}
