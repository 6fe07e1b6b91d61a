//! HTTP server initialization and runtime setup.
//!
//! Handles site loading, cache setup and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::cache::{MemoryRuleSetCache, NullCache, RuleSetCache};
use crate::infrastructure::memory::SiteDefinition;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Site definition from `SITE_FILE`
/// - Rule cache (or NullCache when disabled)
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - The site file cannot be read or parsed
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let site = SiteDefinition::from_file(&config.site_file)
        .with_context(|| format!("Failed to load site from {}", config.site_file.display()))?;
    tracing::info!("Loaded {} tenant(s)", site.tenants.len());

    let cache: Arc<dyn RuleSetCache> = if config.rule_cache {
        tracing::info!("Rule cache enabled");
        Arc::new(MemoryRuleSetCache::new())
    } else {
        tracing::info!("Rule cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let state = AppState::new(&site, cache);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
