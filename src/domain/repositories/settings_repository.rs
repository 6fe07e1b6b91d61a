//! Repository trait for per-tenant rewriting settings.

use crate::domain::entities::{GeneralSettings, RegexSettings, RuleSet, TenantId};
use crate::domain::errors::RewriteError;
use crate::domain::settings_event::SettingsChanged;

/// Storage of each tenant's [`RuleSet`].
///
/// Updates return a [`SettingsChanged`] event; callers are responsible for
/// forwarding it to whatever caches compiled rules.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::SettingsStore`] - In-memory store seeded from the site file
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait SettingsRepository: Send + Sync {
    /// Loads the current rule set of a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] if the tenant is unknown.
    fn load_rule_set(&self, tenant_id: TenantId) -> Result<RuleSet, RewriteError>;

    /// Replaces the general settings of a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] if the tenant is unknown.
    fn update_general(
        &self,
        tenant_id: TenantId,
        settings: GeneralSettings,
    ) -> Result<SettingsChanged, RewriteError>;

    /// Replaces the regex settings of a tenant.
    ///
    /// Patterns are stored as given; validation happens before this call.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] if the tenant is unknown.
    fn update_regex(
        &self,
        tenant_id: TenantId,
        settings: RegexSettings,
    ) -> Result<SettingsChanged, RewriteError>;
}
