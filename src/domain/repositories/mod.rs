//! Collaborator contracts the host implements to feed the rewriting core.
//!
//! The core never owns settings, pages or aliases. It reaches them only through
//! these traits, which are implemented by the infrastructure layer.
//!
//! # Architecture
//!
//! - Traits define the contract for lookups the core performs
//! - Implementations live in `crate::infrastructure`
//! - Mock implementations are auto-generated via `mockall` for testing
//!
//! # Available Repositories
//!
//! - [`SettingsRepository`] - Per-tenant [`RuleSet`](crate::domain::entities::RuleSet) storage
//! - [`PageRepository`] - Page lookup by id and by friendly path
//! - [`TenantRepository`] - Tenant details and host aliases
//! - [`ReasonLocalizer`] - Display text for reason codes
//!
//! All lookups are synchronous: the core never suspends.

pub mod page_repository;
pub mod reason_localizer;
pub mod settings_repository;
pub mod tenant_repository;

pub use page_repository::PageRepository;
pub use reason_localizer::ReasonLocalizer;
pub use settings_repository::SettingsRepository;
pub use tenant_repository::TenantRepository;

#[cfg(test)]
pub use page_repository::MockPageRepository;
#[cfg(test)]
pub use reason_localizer::MockReasonLocalizer;
#[cfg(test)]
pub use settings_repository::MockSettingsRepository;
#[cfg(test)]
pub use tenant_repository::MockTenantRepository;
