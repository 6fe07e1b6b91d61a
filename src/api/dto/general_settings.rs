//! DTOs for the general settings endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::domain::entities::{DeletedPageHandling, GeneralSettings, ReplaceSpaceWith};

/// Label/value pair offered to settings editors.
#[derive(Debug, Serialize)]
pub struct OptionItem {
    pub label: &'static str,
    pub value: &'static str,
}

/// Current general settings as shown to editors.
#[derive(Debug, Serialize)]
pub struct GeneralSettingsView {
    pub enable_system_generated_urls: bool,
    pub replace_space_with: ReplaceSpaceWith,
    pub force_lower_case: bool,
    pub auto_ascii_convert: bool,
    pub force_portal_default_language: bool,
    pub deleted_page_handling: DeletedPageHandling,
    pub redirect_unfriendly: bool,
    pub redirect_wrong_case: bool,
}

impl From<GeneralSettings> for GeneralSettingsView {
    fn from(settings: GeneralSettings) -> Self {
        Self {
            enable_system_generated_urls: settings.replace_space_with != ReplaceSpaceWith::None,
            replace_space_with: settings.replace_space_with,
            force_lower_case: settings.force_lower_case,
            auto_ascii_convert: settings.auto_ascii_convert,
            force_portal_default_language: settings.force_portal_default_language,
            deleted_page_handling: settings.deleted_page_handling,
            redirect_unfriendly: settings.redirect_unfriendly,
            redirect_wrong_case: settings.redirect_wrong_case,
        }
    }
}

/// Response of `GET /api/tenants/{tenant_id}/seo/general`.
#[derive(Debug, Serialize)]
pub struct GeneralSettingsResponse {
    pub settings: GeneralSettingsView,
    pub replacement_characters: Vec<OptionItem>,
    pub deleted_page_handling_types: Vec<OptionItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl GeneralSettingsResponse {
    pub fn new(settings: GeneralSettings, updated_at: Option<DateTime<Utc>>) -> Self {
        Self {
            settings: settings.into(),
            replacement_characters: vec![
                OptionItem {
                    label: "Hyphen (-)",
                    value: "hyphen",
                },
                OptionItem {
                    label: "Underscore (_)",
                    value: "underscore",
                },
            ],
            deleted_page_handling_types: vec![
                OptionItem {
                    label: "Return a 404 error",
                    value: "return404",
                },
                OptionItem {
                    label: "Redirect to the site home page",
                    value: "redirect_to_home",
                },
            ],
            updated_at,
        }
    }
}

/// Request body for `POST /api/tenants/{tenant_id}/seo/general`.
#[derive(Debug, Deserialize, Validate)]
#[validate(schema(function = "validate_replacement"))]
pub struct UpdateGeneralSettingsRequest {
    pub enable_system_generated_urls: bool,
    #[serde(default)]
    pub replace_space_with: ReplaceSpaceWith,
    #[serde(default)]
    pub force_lower_case: bool,
    #[serde(default)]
    pub auto_ascii_convert: bool,
    #[serde(default)]
    pub force_portal_default_language: bool,
    #[serde(default)]
    pub deleted_page_handling: DeletedPageHandling,
    #[serde(default)]
    pub redirect_unfriendly: bool,
    #[serde(default)]
    pub redirect_wrong_case: bool,
}

impl UpdateGeneralSettingsRequest {
    pub fn into_settings(self) -> (GeneralSettings, bool) {
        let settings = GeneralSettings {
            replace_space_with: self.replace_space_with,
            force_lower_case: self.force_lower_case,
            auto_ascii_convert: self.auto_ascii_convert,
            force_portal_default_language: self.force_portal_default_language,
            deleted_page_handling: self.deleted_page_handling,
            redirect_unfriendly: self.redirect_unfriendly,
            redirect_wrong_case: self.redirect_wrong_case,
        };
        (settings, self.enable_system_generated_urls)
    }
}

fn validate_replacement(request: &UpdateGeneralSettingsRequest) -> Result<(), ValidationError> {
    if request.enable_system_generated_urls && request.replace_space_with == ReplaceSpaceWith::None
    {
        let mut error = ValidationError::new("replacement_required");
        error.message =
            Some("A replacement character is required when system generated URLs are enabled".into());
        return Err(error);
    }
    Ok(())
}

/// Acknowledges a stored settings update.
#[derive(Debug, Serialize)]
pub struct UpdateSettingsResponse {
    pub success: bool,
    pub changed_at: DateTime<Utc>,
}
