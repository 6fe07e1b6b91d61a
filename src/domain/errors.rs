//! Domain error taxonomy for URL building and rewriting.

use super::entities::{FieldErrors, PageId, TenantId};

/// Errors raised by the rewriting core and its collaborators.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RewriteError {
    /// One or more regex patterns failed to compile.
    #[error("URL rewriting configuration is invalid: {0}")]
    ConfigInvalid(FieldErrors),

    #[error("Page {page_id} not found for tenant {tenant_id}")]
    PageNotFound { page_id: PageId, tenant_id: TenantId },

    /// No rule set is available for the tenant.
    #[error("URL settings unavailable for tenant {0}")]
    ConfigUnavailable(TenantId),

    #[error("Malformed URI '{uri}': {reason}")]
    MalformedInput { uri: String, reason: String },
}

impl RewriteError {
    pub fn malformed(uri: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedInput {
            uri: uri.into(),
            reason: reason.into(),
        }
    }
}
