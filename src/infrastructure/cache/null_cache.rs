//! No-op cache implementation for disabled caching.

use std::sync::Arc;

use tracing::debug;

use super::service::RuleSetCache;
use crate::domain::entities::TenantId;
use crate::domain::settings_event::SettingsChanged;
use crate::engine::CompiledRules;

/// A cache that never stores anything.
///
/// Every evaluation recompiles the tenant's patterns. Used when `RULE_CACHE`
/// is disabled and in tests that must observe each settings load.
pub struct NullCache;

impl NullCache {
    /// Creates a new NullCache instance.
    pub fn new() -> Self {
        debug!("Using NullCache (rule caching disabled)");
        Self
    }
}

impl Default for NullCache {
    fn default() -> Self {
        Self::new()
    }
}

impl RuleSetCache for NullCache {
    fn get(&self, _tenant_id: TenantId) -> Option<Arc<CompiledRules>> {
        None
    }

    fn generation(&self, _tenant_id: TenantId) -> u64 {
        0
    }

    fn put(&self, _tenant_id: TenantId, _generation: u64, _rules: Arc<CompiledRules>) -> bool {
        false
    }

    fn on_settings_changed(&self, _event: &SettingsChanged) {}

    fn len(&self) -> usize {
        0
    }
}
