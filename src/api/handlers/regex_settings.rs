//! Handlers for the regex settings endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::general_settings::UpdateSettingsResponse;
use crate::api::dto::regex_settings::RegexSettingsDto;
use crate::domain::entities::TenantId;
use crate::error::AppError;
use crate::state::AppState;

/// `GET /api/tenants/{tenant_id}/seo/regex`
pub async fn get_regex_settings_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> Result<Json<RegexSettingsDto>, AppError> {
    let settings = state.settings_service.regex_settings(tenant_id)?;
    Ok(Json(settings.into()))
}

/// Validates and stores the regex settings of a tenant.
///
/// # Endpoint
///
/// `POST /api/tenants/{tenant_id}/seo/regex`
///
/// # Errors
///
/// Returns 400 Bad Request with one entry per invalid field:
///
/// ```json
/// {
///   "error": {
///     "code": "validation_error",
///     "message": "Invalid regular expression settings",
///     "details": {
///       "errors": [
///         { "field": "IgnoreRegex", "message": "The ignore pattern is not a valid regular expression: ..." }
///       ]
///     }
///   }
/// }
/// ```
///
/// Nothing is stored when any pattern is invalid.
pub async fn update_regex_settings_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<RegexSettingsDto>,
) -> Result<Json<UpdateSettingsResponse>, AppError> {
    payload.validate()?;

    let event = state
        .settings_service
        .update_regex_settings(tenant_id, payload.into())?;

    Ok(Json(UpdateSettingsResponse {
        success: true,
        changed_at: event.changed_at,
    }))
}
