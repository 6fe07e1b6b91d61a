//! Built-in English text for reason codes.

use crate::domain::entities::ReasonCode;
use crate::domain::repositories::ReasonLocalizer;

/// Resolves reason codes to fixed English sentences.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticReasonText;

impl ReasonLocalizer for StaticReasonText {
    fn localize(&self, code: ReasonCode) -> String {
        let text = match code {
            ReasonCode::Ignored => "Request matched the ignore pattern",
            ReasonCode::ExplicitExclusion => "Request matched the do-not-rewrite pattern",
            ReasonCode::SystemUrl => "Request is a system URL",
            ReasonCode::NotFound => "Page not found",
            ReasonCode::DeletedPageRedirect => "Page is missing or deleted; redirected to home page",
            ReasonCode::WrongCase => "URL contained upper case characters",
            ReasonCode::UnfriendlyUrl => "Unfriendly URL redirected to its friendly form",
            ReasonCode::InvalidExtensionless => "Extensionless URL is not in the valid list",
            ReasonCode::Rewritten => "Friendly URL rewritten",
        };
        text.to_string()
    }
}
