//! Process-local cache of compiled rules.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use super::service::RuleSetCache;
use crate::domain::entities::TenantId;
use crate::domain::settings_event::SettingsChanged;
use crate::engine::CompiledRules;

#[derive(Default)]
struct Entries {
    rules: HashMap<TenantId, Arc<CompiledRules>>,
    generations: HashMap<TenantId, u64>,
}

impl Entries {
    fn generation(&self, tenant_id: TenantId) -> u64 {
        self.generations.get(&tenant_id).copied().unwrap_or_default()
    }
}

/// Compiled rules keyed by tenant.
///
/// Readers share the lock; a settings change takes the write lock only long
/// enough to remove one entry and bump the tenant's generation.
#[derive(Default)]
pub struct MemoryRuleSetCache {
    entries: RwLock<Entries>,
}

impl MemoryRuleSetCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RuleSetCache for MemoryRuleSetCache {
    fn get(&self, tenant_id: TenantId) -> Option<Arc<CompiledRules>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rules
            .get(&tenant_id)
            .cloned()
    }

    fn generation(&self, tenant_id: TenantId) -> u64 {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .generation(tenant_id)
    }

    fn put(&self, tenant_id: TenantId, generation: u64, rules: Arc<CompiledRules>) -> bool {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        let current = entries.generation(tenant_id);
        if generation != current {
            debug!(
                tenant_id,
                generation, current, "Discarded rules compiled from stale settings"
            );
            return false;
        }

        debug!(tenant_id, generation, "Caching compiled rules");
        entries.rules.insert(tenant_id, rules);
        true
    }

    fn on_settings_changed(&self, event: &SettingsChanged) {
        let mut entries = self.entries.write().unwrap_or_else(PoisonError::into_inner);

        *entries.generations.entry(event.tenant_id).or_default() += 1;
        let removed = entries.rules.remove(&event.tenant_id);

        if removed.is_some() {
            debug!(
                tenant_id = event.tenant_id,
                scope = event.scope.as_str(),
                "Invalidated cached rules"
            );
        }
    }

    fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .rules
            .len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::RuleSet;
    use crate::domain::settings_event::SettingsScope;

    fn compiled() -> Arc<CompiledRules> {
        Arc::new(CompiledRules::compile(RuleSet::default()).unwrap())
    }

    #[test]
    fn test_put_then_get() {
        let cache = MemoryRuleSetCache::new();
        assert!(cache.get(0).is_none());

        assert!(cache.put(0, cache.generation(0), compiled()));

        assert!(cache.get(0).is_some());
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_settings_change_invalidates_only_that_tenant() {
        let cache = MemoryRuleSetCache::new();
        cache.put(0, cache.generation(0), compiled());
        cache.put(1, cache.generation(1), compiled());

        cache.on_settings_changed(&SettingsChanged::new(0, SettingsScope::General));

        assert!(cache.get(0).is_none());
        assert!(cache.get(1).is_some());
        assert_eq!(cache.generation(0), 1);
        assert_eq!(cache.generation(1), 0);
    }

    #[test]
    fn test_put_from_before_invalidation_is_discarded() {
        let cache = MemoryRuleSetCache::new();
        let generation = cache.generation(0);

        cache.on_settings_changed(&SettingsChanged::new(0, SettingsScope::Regex));

        assert!(!cache.put(0, generation, compiled()));
        assert!(cache.get(0).is_none());

        assert!(cache.put(0, cache.generation(0), compiled()));
        assert!(cache.get(0).is_some());
    }

    #[test]
    fn test_invalidating_missing_entry_is_noop() {
        let cache = MemoryRuleSetCache::new();
        cache.on_settings_changed(&SettingsChanged::new(9, SettingsScope::Regex));
        assert!(cache.is_empty());
    }
}
