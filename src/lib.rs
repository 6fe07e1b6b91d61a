//! # Friendly URLs
//!
//! Friendly URL generation, request rewriting and SEO settings for
//! multi-tenant sites, with a settings and diagnostics API built on Axum.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Rule sets, pages, tenants, decisions and collaborator traits
//! - **Engine** ([`engine`]) - Pattern validation, URL builder, rewrite stages and diagnostics
//! - **Application Layer** ([`application`]) - Settings and test tool services
//! - **Infrastructure Layer** ([`infrastructure`]) - Site file, in-memory stores, rule cache
//! - **API Layer** ([`api`]) - REST API handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Per-tenant general and regex settings with all-or-nothing validation
//! - Friendly URL generation for every portal alias
//! - Ordered rewrite stages: ignore, do-not-rewrite, system URLs, page
//!   resolution, wrong-case and unfriendly redirects, deleted pages
//! - Diagnostics record for any request URI
//! - Rate limiting and observability
//!
//! ## Quick Start
//!
//! ```bash
//! export SITE_FILE="./site.example.json"
//! cargo run
//!
//! curl 'http://localhost:3000/api/tenants/0/seo/test-rewrite?uri=http%3A%2F%2Fsite.com%2FAbout-Us'
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod engine;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{SettingsService, UrlTestService};
    pub use crate::domain::entities::{
        GeneralSettings, PageRecord, ReasonCode, RegexSettings, RewriteAction, RewriteDecision,
        RuleSet,
    };
    pub use crate::domain::errors::RewriteError;
    pub use crate::engine::{CompiledRules, DiagnosticsReport, RewriteEngine, UrlBuilder};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
