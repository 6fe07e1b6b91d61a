//! Per-tenant URL rewriting rules.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Character substituted for spaces in generated URL segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplaceSpaceWith {
    #[default]
    Hyphen,
    Underscore,
    /// Spaces are removed. Also means "system generated URLs" are disabled.
    None,
}

impl ReplaceSpaceWith {
    /// The replacement text, empty for [`ReplaceSpaceWith::None`].
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hyphen => "-",
            Self::Underscore => "_",
            Self::None => "",
        }
    }
}

/// What to do when a request maps to a missing or deleted page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeletedPageHandling {
    #[default]
    Return404,
    RedirectToHome,
}

/// Flags and policies controlling URL generation and redirects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralSettings {
    pub replace_space_with: ReplaceSpaceWith,
    pub force_lower_case: bool,
    pub auto_ascii_convert: bool,
    pub force_portal_default_language: bool,
    pub deleted_page_handling: DeletedPageHandling,
    pub redirect_unfriendly: bool,
    pub redirect_wrong_case: bool,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            replace_space_with: ReplaceSpaceWith::Hyphen,
            force_lower_case: false,
            auto_ascii_convert: false,
            force_portal_default_language: false,
            deleted_page_handling: DeletedPageHandling::Return404,
            redirect_unfriendly: true,
            redirect_wrong_case: false,
        }
    }
}

/// Identifies one of the regular expression fields of [`RegexSettings`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PatternField {
    IgnoreRegex,
    DoNotRewriteRegex,
    UseSiteUrlsRegex,
    DoNotRedirectRegex,
    DoNotRedirectSecureRegex,
    ForceLowerCaseRegex,
    NoFriendlyUrlRegex,
    DoNotIncludeInPathRegex,
    ValidExtensionlessUrlsRegex,
    RegexMatch,
}

impl PatternField {
    /// Number of pattern fields.
    pub const COUNT: usize = 10;

    /// Every field, in declaration order.
    pub const ALL: [PatternField; Self::COUNT] = [
        Self::IgnoreRegex,
        Self::DoNotRewriteRegex,
        Self::UseSiteUrlsRegex,
        Self::DoNotRedirectRegex,
        Self::DoNotRedirectSecureRegex,
        Self::ForceLowerCaseRegex,
        Self::NoFriendlyUrlRegex,
        Self::DoNotIncludeInPathRegex,
        Self::ValidExtensionlessUrlsRegex,
        Self::RegexMatch,
    ];

    /// Field name as exposed by the settings API.
    pub fn name(&self) -> &'static str {
        match self {
            Self::IgnoreRegex => "IgnoreRegex",
            Self::DoNotRewriteRegex => "DoNotRewriteRegex",
            Self::UseSiteUrlsRegex => "UseSiteUrlsRegex",
            Self::DoNotRedirectRegex => "DoNotRedirectRegex",
            Self::DoNotRedirectSecureRegex => "DoNotRedirectSecureRegex",
            Self::ForceLowerCaseRegex => "ForceLowerCaseRegex",
            Self::NoFriendlyUrlRegex => "NoFriendlyUrlRegex",
            Self::DoNotIncludeInPathRegex => "DoNotIncludeInPathRegex",
            Self::ValidExtensionlessUrlsRegex => "ValidExtensionlessUrlsRegex",
            Self::RegexMatch => "RegexMatch",
        }
    }

    /// Human-readable description used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::IgnoreRegex => "ignore pattern",
            Self::DoNotRewriteRegex => "do-not-rewrite pattern",
            Self::UseSiteUrlsRegex => "site-URLs-only pattern",
            Self::DoNotRedirectRegex => "do-not-redirect pattern",
            Self::DoNotRedirectSecureRegex => "do-not-redirect HTTPS pattern",
            Self::ForceLowerCaseRegex => "prevent-lower-case pattern",
            Self::NoFriendlyUrlRegex => "no-friendly-URL pattern",
            Self::DoNotIncludeInPathRegex => "keep-in-query-string pattern",
            Self::ValidExtensionlessUrlsRegex => "valid extensionless URL pattern",
            Self::RegexMatch => "valid friendly URL pattern",
        }
    }
}

impl fmt::Display for PatternField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Regular expressions consulted while building and rewriting URLs.
///
/// An empty pattern disables its rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RegexSettings {
    pub ignore: String,
    pub do_not_rewrite: String,
    pub site_urls_only: String,
    pub do_not_redirect: String,
    pub do_not_redirect_secure: String,
    pub force_lower_case: String,
    pub no_friendly_url: String,
    pub do_not_include_in_path: String,
    pub valid_extensionless: String,
    pub valid_friendly_url_match: String,
}

impl RegexSettings {
    /// Returns the pattern configured for `field`.
    pub fn pattern(&self, field: PatternField) -> &str {
        match field {
            PatternField::IgnoreRegex => &self.ignore,
            PatternField::DoNotRewriteRegex => &self.do_not_rewrite,
            PatternField::UseSiteUrlsRegex => &self.site_urls_only,
            PatternField::DoNotRedirectRegex => &self.do_not_redirect,
            PatternField::DoNotRedirectSecureRegex => &self.do_not_redirect_secure,
            PatternField::ForceLowerCaseRegex => &self.force_lower_case,
            PatternField::NoFriendlyUrlRegex => &self.no_friendly_url,
            PatternField::DoNotIncludeInPathRegex => &self.do_not_include_in_path,
            PatternField::ValidExtensionlessUrlsRegex => &self.valid_extensionless,
            PatternField::RegexMatch => &self.valid_friendly_url_match,
        }
    }

    /// Iterates `(field, pattern)` pairs in field order.
    pub fn iter(&self) -> impl Iterator<Item = (PatternField, &str)> {
        PatternField::ALL
            .into_iter()
            .map(move |field| (field, self.pattern(field)))
    }
}

/// Snapshot of every rewriting rule for one tenant.
///
/// A `RuleSet` is plain data. It must be compiled into
/// [`crate::engine::CompiledRules`] before the engine can apply it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub general: GeneralSettings,
    pub patterns: RegexSettings,
}

impl RuleSet {
    pub fn new(general: GeneralSettings, patterns: RegexSettings) -> Self {
        Self { general, patterns }
    }
}
