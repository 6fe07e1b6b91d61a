//! DTOs for the regex settings endpoints.
//!
//! Field names match [`PatternField::name`](crate::domain::entities::PatternField::name),
//! so validation errors point at the JSON keys the client sent.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::domain::entities::RegexSettings;

/// Longest pattern accepted for any single field.
const MAX_PATTERN_LEN: u64 = 4096;

/// Regex settings on the wire, used for both reads and updates.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "PascalCase", default)]
pub struct RegexSettingsDto {
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub ignore_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub do_not_rewrite_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub use_site_urls_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub do_not_redirect_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub do_not_redirect_secure_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub force_lower_case_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub no_friendly_url_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub do_not_include_in_path_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub valid_extensionless_urls_regex: String,
    #[validate(length(max = MAX_PATTERN_LEN))]
    pub regex_match: String,
}

impl From<RegexSettings> for RegexSettingsDto {
    fn from(settings: RegexSettings) -> Self {
        Self {
            ignore_regex: settings.ignore,
            do_not_rewrite_regex: settings.do_not_rewrite,
            use_site_urls_regex: settings.site_urls_only,
            do_not_redirect_regex: settings.do_not_redirect,
            do_not_redirect_secure_regex: settings.do_not_redirect_secure,
            force_lower_case_regex: settings.force_lower_case,
            no_friendly_url_regex: settings.no_friendly_url,
            do_not_include_in_path_regex: settings.do_not_include_in_path,
            valid_extensionless_urls_regex: settings.valid_extensionless,
            regex_match: settings.valid_friendly_url_match,
        }
    }
}

impl From<RegexSettingsDto> for RegexSettings {
    fn from(dto: RegexSettingsDto) -> Self {
        Self {
            ignore: dto.ignore_regex,
            do_not_rewrite: dto.do_not_rewrite_regex,
            site_urls_only: dto.use_site_urls_regex,
            do_not_redirect: dto.do_not_redirect_regex,
            do_not_redirect_secure: dto.do_not_redirect_secure_regex,
            force_lower_case: dto.force_lower_case_regex,
            no_friendly_url: dto.no_friendly_url_regex,
            do_not_include_in_path: dto.do_not_include_in_path_regex,
            valid_extensionless: dto.valid_extensionless_urls_regex,
            valid_friendly_url_match: dto.regex_match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::PatternField;

    #[test]
    fn test_wire_names_match_field_names() {
        let value = serde_json::to_value(RegexSettingsDto::default()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), PatternField::COUNT);
        for field in PatternField::ALL {
            assert!(object.contains_key(field.name()), "missing {}", field.name());
        }
    }

    #[test]
    fn test_conversion_keeps_patterns() {
        let dto: RegexSettingsDto =
            serde_json::from_str(r#"{"IgnoreRegex": "\\.axd$", "RegexMatch": "[^a-z]"}"#).unwrap();
        let settings = RegexSettings::from(dto);

        assert_eq!(settings.ignore, r"\.axd$");
        assert_eq!(settings.valid_friendly_url_match, "[^a-z]");
        assert!(settings.do_not_rewrite.is_empty());
    }

    #[test]
    fn test_overlong_pattern_rejected() {
        let dto = RegexSettingsDto {
            ignore_regex: "a".repeat(5000),
            ..Default::default()
        };
        assert!(dto.validate().is_err());
    }
}
