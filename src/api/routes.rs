//! API route configuration.

use crate::api::handlers::{
    get_general_settings_handler, get_regex_settings_handler, test_rewrite_handler,
    test_url_handler, update_general_settings_handler, update_regex_settings_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Per-tenant SEO settings and test tool routes.
///
/// # Endpoints
///
/// - `GET  /tenants/{tenant_id}/seo/general`      - General settings with option lists
/// - `POST /tenants/{tenant_id}/seo/general`      - Replace general settings
/// - `GET  /tenants/{tenant_id}/seo/regex`        - Regex settings
/// - `POST /tenants/{tenant_id}/seo/regex`        - Validate and replace regex settings
/// - `GET  /tenants/{tenant_id}/seo/test-url`     - Friendly URL of a page under every alias
/// - `GET  /tenants/{tenant_id}/seo/test-rewrite` - Diagnostics for one request URI
pub fn seo_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/tenants/{tenant_id}/seo/general",
            get(get_general_settings_handler).post(update_general_settings_handler),
        )
        .route(
            "/tenants/{tenant_id}/seo/regex",
            get(get_regex_settings_handler).post(update_regex_settings_handler),
        )
        .route("/tenants/{tenant_id}/seo/test-url", get(test_url_handler))
        .route(
            "/tenants/{tenant_id}/seo/test-rewrite",
            get(test_rewrite_handler),
        )
}
