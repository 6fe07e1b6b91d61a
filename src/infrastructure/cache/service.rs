//! Compiled rule cache trait.

use std::sync::Arc;

use crate::domain::entities::TenantId;
use crate::domain::settings_event::SettingsChanged;
use crate::engine::CompiledRules;

/// Keeps compiled rules per tenant so patterns are not recompiled on every
/// request.
///
/// Entries are only ever dropped through [`RuleSetCache::on_settings_changed`];
/// there is no time-based expiry. Each invalidation bumps the tenant's
/// generation, and a [`RuleSetCache::put`] carrying an older generation is
/// discarded, so rules compiled from settings loaded before a change never
/// outlive it.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::MemoryRuleSetCache`] - Process-local map
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
pub trait RuleSetCache: Send + Sync {
    /// Returns the cached rules of a tenant, if any.
    fn get(&self, tenant_id: TenantId) -> Option<Arc<CompiledRules>>;

    /// Current generation of the tenant's settings. Read it before loading
    /// the settings that will be compiled and passed to [`RuleSetCache::put`].
    fn generation(&self, tenant_id: TenantId) -> u64;

    /// Stores rules compiled from settings read at `generation`.
    ///
    /// Returns `false` and stores nothing when the tenant was invalidated
    /// since that generation was read.
    fn put(&self, tenant_id: TenantId, generation: u64, rules: Arc<CompiledRules>) -> bool;

    /// Drops whatever is cached for the tenant named by `event`.
    fn on_settings_changed(&self, event: &SettingsChanged);

    /// Number of cached tenants, reported by the health endpoint.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
