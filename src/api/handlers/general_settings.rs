//! Handlers for the general settings endpoints.

use axum::{
    Json,
    extract::{Path, State},
};
use validator::Validate;

use crate::api::dto::general_settings::{
    GeneralSettingsResponse, UpdateGeneralSettingsRequest, UpdateSettingsResponse,
};
use crate::domain::entities::TenantId;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the general settings of a tenant with the option lists editors
/// choose from.
///
/// # Endpoint
///
/// `GET /api/tenants/{tenant_id}/seo/general`
///
/// # Errors
///
/// Returns 404 Not Found if the tenant is unknown.
pub async fn get_general_settings_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
) -> Result<Json<GeneralSettingsResponse>, AppError> {
    let settings = state.settings_service.general_settings(tenant_id)?;
    let updated_at = state.store.updated_at(tenant_id);

    Ok(Json(GeneralSettingsResponse::new(settings, updated_at)))
}

/// Replaces the general settings of a tenant.
///
/// # Endpoint
///
/// `POST /api/tenants/{tenant_id}/seo/general`
///
/// # Request Body
///
/// ```json
/// {
///   "enable_system_generated_urls": true,
///   "replace_space_with": "hyphen",
///   "force_lower_case": true,
///   "auto_ascii_convert": false,
///   "force_portal_default_language": false,
///   "deleted_page_handling": "return404",
///   "redirect_unfriendly": true,
///   "redirect_wrong_case": true
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 404 Not Found if the tenant is unknown.
pub async fn update_general_settings_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Json(payload): Json<UpdateGeneralSettingsRequest>,
) -> Result<Json<UpdateSettingsResponse>, AppError> {
    payload.validate()?;

    let (settings, system_generated_urls) = payload.into_settings();
    let event = state.settings_service.update_general_settings(
        tenant_id,
        settings,
        system_generated_urls,
    )?;

    Ok(Json(UpdateSettingsResponse {
        success: true,
        changed_at: event.changed_at,
    }))
}
