//! Application layer services implementing the settings and diagnostics
//! operations.
//!
//! This layer orchestrates the engine by coordinating repository calls,
//! validation and the compiled rule cache. Services consume repository traits
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::settings_service::SettingsService`] - General and regex settings
//! - [`services::url_test_service::UrlTestService`] - Friendly URL generation and rewrite diagnostics

pub mod metrics;
pub mod services;
