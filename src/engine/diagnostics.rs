//! Flat, display-ready rendering of rewrite decisions.

use serde::Serialize;

use crate::domain::entities::RewriteDecision;
use crate::domain::errors::RewriteError;
use crate::domain::repositories::ReasonLocalizer;

/// Placeholder shown for fields that carry no value.
pub const NONE: &str = "None";

/// Diagnostics record shown by the test-rewrite tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagnosticsReport {
    pub rewriting_result: String,
    pub culture: String,
    pub identified_page: String,
    pub redirection_reason: String,
    pub redirection_result: String,
    pub operation_messages: String,
}

impl DiagnosticsReport {
    /// Report for a request that could not be evaluated. Every field is
    /// [`NONE`] except the messages, which carry the error text.
    pub fn failed(error: &RewriteError) -> Self {
        Self {
            rewriting_result: NONE.to_string(),
            culture: NONE.to_string(),
            identified_page: NONE.to_string(),
            redirection_reason: NONE.to_string(),
            redirection_result: NONE.to_string(),
            operation_messages: error.to_string(),
        }
    }
}

/// Flattens an evaluation outcome into a [`DiagnosticsReport`].
///
/// Never fails: an evaluation error yields [`DiagnosticsReport::failed`].
/// Absent values render as [`NONE`].
pub fn report(
    outcome: &Result<RewriteDecision, RewriteError>,
    localizer: &dyn ReasonLocalizer,
) -> DiagnosticsReport {
    match outcome {
        Ok(decision) => DiagnosticsReport {
            rewriting_result: decision.rewritten_path().unwrap_or(NONE).to_string(),
            culture: decision.locale().unwrap_or(NONE).to_string(),
            identified_page: decision
                .page()
                .map(|page| page.name.clone())
                .unwrap_or_else(|| NONE.to_string()),
            redirection_reason: localizer.localize(decision.reason()),
            redirection_result: decision.final_url().to_string(),
            operation_messages: decision.debug_trace().join("\n"),
        },
        Err(error) => DiagnosticsReport::failed(error),
    }
}
