//! Domain layer containing the friendly-URL data model and collaborator contracts.
//!
//! # Architecture
//!
//! - [`entities`] - Rule sets, pages, tenants, decisions
//! - [`repositories`] - Traits the host implements to feed the core
//! - [`errors`] - [`errors::RewriteError`] taxonomy
//! - [`settings_event`] - Explicit change events used for cache invalidation
//!
//! # Design Principles
//!
//! - Domain layer has no dependencies on infrastructure or presentation layers
//! - Repository traits define contracts implemented by the infrastructure layer
//! - Rewriting algorithms live in [`crate::engine`]; orchestration in
//!   [`crate::application::services`]

pub mod entities;
pub mod errors;
pub mod repositories;
pub mod settings_event;
