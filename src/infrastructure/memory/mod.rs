//! In-memory collaborators backed by a JSON site file.
//!
//! - [`SiteDefinition`] - The parsed site file
//! - [`SettingsStore`] - Mutable per-tenant rule sets
//! - [`SiteDirectory`] - Tenants, aliases and pages

mod settings_store;
mod site_definition;
mod site_directory;

pub use settings_store::SettingsStore;
pub use site_definition::{PageDefinition, SiteDefinition, SiteError, TenantDefinition};
pub use site_directory::SiteDirectory;
