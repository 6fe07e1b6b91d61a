//! Outcome of evaluating a request URI.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::page::PageRecord;

/// What the host should do with the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RewriteAction {
    PassThrough,
    Rewrite,
    Redirect,
}

/// Why the engine reached its decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReasonCode {
    Ignored,
    ExplicitExclusion,
    SystemUrl,
    NotFound,
    DeletedPageRedirect,
    WrongCase,
    UnfriendlyUrl,
    InvalidExtensionless,
    Rewritten,
}

impl ReasonCode {
    /// Stable key used for localization lookups and metric labels.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ignored => "Ignored",
            Self::ExplicitExclusion => "ExplicitExclusion",
            Self::SystemUrl => "SystemUrl",
            Self::NotFound => "NotFound",
            Self::DeletedPageRedirect => "DeletedPageRedirect",
            Self::WrongCase => "WrongCase",
            Self::UnfriendlyUrl => "UnfriendlyUrl",
            Self::InvalidExtensionless => "InvalidExtensionless",
            Self::Rewritten => "Rewritten",
        }
    }

    /// Parses a key produced by [`ReasonCode::as_str`].
    pub fn from_key(key: &str) -> Option<Self> {
        [
            Self::Ignored,
            Self::ExplicitExclusion,
            Self::SystemUrl,
            Self::NotFound,
            Self::DeletedPageRedirect,
            Self::WrongCase,
            Self::UnfriendlyUrl,
            Self::InvalidExtensionless,
            Self::Rewritten,
        ]
        .into_iter()
        .find(|code| code.as_str() == key)
    }
}

impl fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable result of a single rewrite evaluation.
///
/// Built by [`crate::engine::RewriteEngine`]; carries the ordered trace of
/// every stage that ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteDecision {
    action: RewriteAction,
    rewritten_path: Option<String>,
    final_url: String,
    locale: Option<String>,
    page: Option<PageRecord>,
    reason: ReasonCode,
    debug_trace: Vec<String>,
}

impl RewriteDecision {
    pub(crate) fn new(
        action: RewriteAction,
        rewritten_path: Option<String>,
        final_url: String,
        locale: Option<String>,
        page: Option<PageRecord>,
        reason: ReasonCode,
        debug_trace: Vec<String>,
    ) -> Self {
        Self {
            action,
            rewritten_path,
            final_url,
            locale,
            page,
            reason,
            debug_trace,
        }
    }

    pub fn action(&self) -> RewriteAction {
        self.action
    }

    pub fn rewritten_path(&self) -> Option<&str> {
        self.rewritten_path.as_deref()
    }

    pub fn final_url(&self) -> &str {
        &self.final_url
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn page(&self) -> Option<&PageRecord> {
        self.page.as_ref()
    }

    pub fn reason(&self) -> ReasonCode {
        self.reason
    }

    pub fn debug_trace(&self) -> &[String] {
        &self.debug_trace
    }

    /// HTTP status the host should answer with.
    pub fn status_code(&self) -> u16 {
        match (self.action, self.reason) {
            (RewriteAction::Redirect, _) => 301,
            (_, ReasonCode::NotFound) => 404,
            _ => 200,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decision(action: RewriteAction, reason: ReasonCode) -> RewriteDecision {
        RewriteDecision::new(
            action,
            None,
            "http://site.com/".to_string(),
            None,
            None,
            reason,
            vec!["trace".to_string()],
        )
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            decision(RewriteAction::Redirect, ReasonCode::WrongCase).status_code(),
            301
        );
        assert_eq!(
            decision(RewriteAction::PassThrough, ReasonCode::NotFound).status_code(),
            404
        );
        assert_eq!(
            decision(RewriteAction::Rewrite, ReasonCode::Rewritten).status_code(),
            200
        );
    }

    #[test]
    fn test_reason_code_key_round_trip() {
        assert_eq!(
            ReasonCode::from_key("DeletedPageRedirect"),
            Some(ReasonCode::DeletedPageRedirect)
        );
        assert_eq!(ReasonCode::from_key("Unknown"), None);
    }
}
