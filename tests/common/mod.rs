#![allow(dead_code)]

use axum::Router;
use axum::routing::get;
use axum_test::TestServer;
use std::sync::Arc;
use friendly_urls::api;
use friendly_urls::api::handlers::health_handler;
use friendly_urls::infrastructure::cache::{MemoryRuleSetCache, RuleSetCache};
use friendly_urls::infrastructure::memory::SiteDefinition;
use friendly_urls::state::AppState;

pub const SITE: &str = r#"{
    "tenants": [{
        "id": 0,
        "name": "Main",
        "home_page_id": 1,
        "locales": ["en-US", "fr-FR"],
        "aliases": [
            { "http_alias": "site.com", "is_primary": true },
            { "http_alias": "www.site.com" }
        ],
        "pages": [
            { "id": 1, "name": "Home", "path": "" },
            { "id": 53, "name": "About Us", "path": "/About Us" },
            { "id": 54, "name": "My Page", "path": "/My Page" },
            { "id": 60, "name": "Old", "path": "/Old", "deleted": true }
        ]
    }]
}"#;

pub fn create_test_state() -> AppState {
    let site = SiteDefinition::from_json(SITE).unwrap();
    let cache: Arc<dyn RuleSetCache> = Arc::new(MemoryRuleSetCache::new());
    AppState::new(&site, cache)
}

/// Router with every route but without the rate limiter, which needs the
/// peer address of a real connection.
pub fn create_test_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::seo_routes())
        .with_state(state)
}

pub fn create_test_server() -> TestServer {
    TestServer::new(create_test_router(create_test_state())).unwrap()
}
