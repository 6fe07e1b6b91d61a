//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: Site loaded
/// - **503 Service Unavailable**: No tenant is configured
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "site": { "status": "ok", "message": "1 tenant(s), 12 page(s)" },
///     "rule_cache": { "status": "ok", "message": "1 tenant(s) cached" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let site_check = check_site(&state);
    let cache_check = check_cache(&state);

    let all_healthy = site_check.status == "ok" && cache_check.status == "ok";

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            site: site_check,
            rule_cache: cache_check,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

fn check_site(state: &AppState) -> CheckStatus {
    let tenants = state.site.tenant_ids().len();
    if tenants == 0 {
        CheckStatus {
            status: "error".to_string(),
            message: Some("No tenants configured".to_string()),
        }
    } else {
        CheckStatus {
            status: "ok".to_string(),
            message: Some(format!(
                "{} tenant(s), {} page(s)",
                tenants,
                state.site.page_count()
            )),
        }
    }
}

fn check_cache(state: &AppState) -> CheckStatus {
    CheckStatus {
        status: "ok".to_string(),
        message: Some(format!("{} tenant(s) cached", state.cache.len())),
    }
}
