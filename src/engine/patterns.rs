//! Pattern validation and compilation of rule sets.

use std::borrow::Cow;

use fancy_regex::Regex;
use tracing::debug;

use crate::domain::entities::{
    FieldErrors, GeneralSettings, PatternField, RegexSettings, RuleSet, ValidationResult,
};
use crate::domain::errors::RewriteError;

/// Compiles one configured pattern.
///
/// Patterns match case-insensitively and may use look-around and
/// backreferences. A blank pattern disables its rule and compiles to `None`.
///
/// # Errors
///
/// Returns the `fancy_regex` error if the pattern does not compile.
pub fn compile_pattern(pattern: &str) -> Result<Option<Regex>, fancy_regex::Error> {
    if pattern.trim().is_empty() {
        return Ok(None);
    }

    Regex::new(&format!("(?i){pattern}")).map(Some)
}

/// Checks every pattern of `settings` independently.
///
/// A failing field never prevents the remaining fields from being checked, so
/// the result lists every invalid field at once.
///
/// # Examples
///
/// ```ignore
/// let settings = RegexSettings {
///     ignore: "(".to_string(),
///     do_not_rewrite: "[".to_string(),
///     ..Default::default()
/// };
/// assert_eq!(validate_patterns(&settings).errors().len(), 2);
/// ```
pub fn validate_patterns(settings: &RegexSettings) -> ValidationResult {
    let mut errors = FieldErrors::new();

    for (field, pattern) in settings.iter() {
        if let Err(e) = compile_pattern(pattern) {
            debug!(field = field.name(), "Rejected pattern: {}", e);
            errors.insert(field, invalid_pattern_message(field, &e));
        }
    }

    ValidationResult::from(errors)
}

fn invalid_pattern_message(field: PatternField, error: &fancy_regex::Error) -> String {
    format!(
        "The {} is not a valid regular expression: {}",
        field.label(),
        error
    )
}

/// A [`RuleSet`] whose patterns are all known to compile.
///
/// This is the only form of rules the URL builder and rewrite engine accept,
/// so an invalid configuration can never be applied to a request.
#[derive(Debug, Clone)]
pub struct CompiledRules {
    rules: RuleSet,
    patterns: [Option<Regex>; PatternField::COUNT],
}

impl CompiledRules {
    /// Compiles all patterns of `rules`.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigInvalid`] listing every field that failed.
    pub fn compile(rules: RuleSet) -> Result<Self, RewriteError> {
        let mut errors = FieldErrors::new();
        let mut patterns: [Option<Regex>; PatternField::COUNT] = Default::default();

        for (field, pattern) in rules.patterns.iter() {
            match compile_pattern(pattern) {
                Ok(regex) => patterns[field as usize] = regex,
                Err(e) => errors.insert(field, invalid_pattern_message(field, &e)),
            }
        }

        if !errors.is_empty() {
            return Err(RewriteError::ConfigInvalid(errors));
        }

        Ok(Self { rules, patterns })
    }

    pub fn rule_set(&self) -> &RuleSet {
        &self.rules
    }

    pub fn general(&self) -> &GeneralSettings {
        &self.rules.general
    }

    pub fn regex_settings(&self) -> &RegexSettings {
        &self.rules.patterns
    }

    /// The compiled pattern for `field`, `None` when the rule is disabled.
    pub fn pattern(&self, field: PatternField) -> Option<&Regex> {
        self.patterns[field as usize].as_ref()
    }

    /// Whether the rule for `field` is configured.
    pub fn is_enabled(&self, field: PatternField) -> bool {
        self.pattern(field).is_some()
    }

    /// Whether the rule for `field` is enabled and matches `text`.
    ///
    /// A match that exceeds the backtracking limit counts as no match.
    pub fn is_match(&self, field: PatternField, text: &str) -> bool {
        let Some(regex) = self.pattern(field) else {
            return false;
        };
        regex.is_match(text).unwrap_or_else(|e| {
            debug!(field = field.name(), "Pattern match aborted: {}", e);
            false
        })
    }

    /// Removes every match of the rule for `field` from `text`.
    ///
    /// Returns `text` unchanged when the rule is disabled or matching aborts.
    pub fn remove_matches<'t>(&self, field: PatternField, text: &'t str) -> Cow<'t, str> {
        let Some(regex) = self.pattern(field) else {
            return Cow::Borrowed(text);
        };
        regex.try_replacen(text, 0, "").unwrap_or_else(|e| {
            debug!(field = field.name(), "Pattern replace aborted: {}", e);
            Cow::Borrowed(text)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patterns_are_valid() {
        let result = validate_patterns(&RegexSettings::default());
        assert!(result.is_valid());
    }

    #[test]
    fn test_whitespace_pattern_disables_rule() {
        assert!(compile_pattern("   ").unwrap().is_none());
    }

    #[test]
    fn test_single_invalid_pattern_is_reported() {
        let settings = RegexSettings {
            ignore: r"\.css$".to_string(),
            no_friendly_url: "(unclosed".to_string(),
            ..Default::default()
        };

        let errors = validate_patterns(&settings).errors();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains(PatternField::NoFriendlyUrlRegex));
        assert!(
            errors
                .get(PatternField::NoFriendlyUrlRegex)
                .unwrap()
                .starts_with("The no-friendly-URL pattern is not a valid regular expression")
        );
    }

    #[test]
    fn test_invalid_patterns_are_reported_independently() {
        let settings = RegexSettings {
            ignore: "(".to_string(),
            do_not_rewrite: "[a-".to_string(),
            site_urls_only: "ok".to_string(),
            ..Default::default()
        };

        let result = validate_patterns(&settings);
        assert!(!result.is_valid());

        let errors = result.errors();
        assert_eq!(errors.len(), 2);
        assert!(errors.contains(PatternField::IgnoreRegex));
        assert!(errors.contains(PatternField::DoNotRewriteRegex));
        assert!(!errors.contains(PatternField::UseSiteUrlsRegex));
    }

    #[test]
    fn test_compile_rejects_invalid_rule_set() {
        let rules = RuleSet {
            patterns: RegexSettings {
                valid_friendly_url_match: "(?<".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        match CompiledRules::compile(rules) {
            Err(RewriteError::ConfigInvalid(errors)) => {
                assert!(errors.contains(PatternField::RegexMatch));
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
    }

    #[test]
    fn test_compiled_patterns_match_case_insensitively() {
        let rules = RuleSet {
            patterns: RegexSettings {
                ignore: r"/images/".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };

        let compiled = CompiledRules::compile(rules).unwrap();
        assert!(compiled.is_match(PatternField::IgnoreRegex, "http://site.com/IMAGES/a.png"));
        assert!(!compiled.is_match(PatternField::DoNotRewriteRegex, "anything"));
        assert!(compiled.pattern(PatternField::DoNotRewriteRegex).is_none());
    }

    #[test]
    fn test_look_around_patterns_are_valid() {
        let settings = RegexSettings {
            do_not_redirect_secure: r"^(?!.*/DesktopModules/).+".to_string(),
            ignore: r"(?<!linkclick\.aspx)\.pdf$".to_string(),
            do_not_redirect: r"/(\w+)/\1/".to_string(),
            ..Default::default()
        };
        assert!(validate_patterns(&settings).is_valid());

        let compiled = CompiledRules::compile(RuleSet {
            patterns: settings,
            ..Default::default()
        })
        .unwrap();

        let field = PatternField::DoNotRedirectSecureRegex;
        assert!(compiled.is_match(field, "https://site.com/about-us"));
        assert!(!compiled.is_match(field, "https://site.com/DesktopModules/x.js"));

        let field = PatternField::IgnoreRegex;
        assert!(compiled.is_match(field, "http://site.com/files/report.PDF"));
        assert!(!compiled.is_match(field, "http://site.com/LinkClick.aspx.pdf"));

        let field = PatternField::DoNotRedirectRegex;
        assert!(compiled.is_match(field, "http://site.com/shop/shop/item"));
    }

    #[test]
    fn test_remove_matches_strips_every_occurrence() {
        let compiled = CompiledRules::compile(RuleSet {
            patterns: RegexSettings {
                valid_friendly_url_match: r"[^\w\d _-]".to_string(),
                ..Default::default()
            },
            ..Default::default()
        })
        .unwrap();

        assert_eq!(compiled.remove_matches(PatternField::RegexMatch, "Q&A!"), "QA");
        assert_eq!(compiled.remove_matches(PatternField::IgnoreRegex, "Q&A!"), "Q&A!");
    }
}
