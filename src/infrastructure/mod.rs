//! Infrastructure layer for the host-side collaborators.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete storage, lookups and caching.
//!
//! # Modules
//!
//! - [`cache`] - Compiled rule caching (in-memory and no-op implementations)
//! - [`memory`] - Settings, tenants and pages loaded from a site file
//! - [`localization`] - Reason code display text

pub mod cache;
pub mod localization;
pub mod memory;
