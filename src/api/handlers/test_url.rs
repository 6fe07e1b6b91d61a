//! Handlers for the friendly URL and rewrite test tools.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use validator::Validate;

use crate::api::dto::test_url::{
    TestRewriteQuery, TestRewriteResponse, TestUrlQuery, TestUrlResponse,
};
use crate::domain::entities::TenantId;
use crate::error::AppError;
use crate::state::AppState;

/// Builds the friendly URL of a page under every alias of the tenant.
///
/// # Endpoint
///
/// `GET /api/tenants/{tenant_id}/seo/test-url?page_id=53&query_string=ab%3Dcd&custom_page_name=test-page`
///
/// # Errors
///
/// Returns 400 Bad Request if the query is invalid.
/// Returns 404 Not Found if the tenant or page is unknown.
pub async fn test_url_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(params): Query<TestUrlQuery>,
) -> Result<Json<TestUrlResponse>, AppError> {
    params.validate()?;

    let urls = state.url_test_service.build_friendly_urls(
        params.page_id,
        params.query_string.as_deref().unwrap_or_default(),
        params.custom_page_name.as_deref().unwrap_or_default(),
        tenant_id,
    )?;

    Ok(Json(TestUrlResponse { urls }))
}

/// Evaluates a request URI and returns the diagnostics record.
///
/// # Endpoint
///
/// `GET /api/tenants/{tenant_id}/seo/test-rewrite?uri=http%3A%2F%2Fsite.com%2Ftest-page`
///
/// Evaluation failures, including malformed URIs and unknown tenants, are
/// reported inside the record rather than as HTTP errors.
pub async fn test_rewrite_handler(
    State(state): State<AppState>,
    Path(tenant_id): Path<TenantId>,
    Query(params): Query<TestRewriteQuery>,
) -> Result<Json<TestRewriteResponse>, AppError> {
    params.validate()?;

    let rewriting_result = state
        .url_test_service
        .evaluate_rewrite(&params.uri, tenant_id);

    Ok(Json(TestRewriteResponse { rewriting_result }))
}
