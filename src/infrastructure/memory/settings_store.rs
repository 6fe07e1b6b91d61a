//! In-memory implementation of the settings repository.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::{DateTime, Utc};
use tracing::info;

use super::site_definition::SiteDefinition;
use crate::domain::entities::{GeneralSettings, RegexSettings, RuleSet, TenantId};
use crate::domain::errors::RewriteError;
use crate::domain::repositories::SettingsRepository;
use crate::domain::settings_event::{SettingsChanged, SettingsScope};

#[derive(Debug, Clone)]
struct StoredRules {
    rules: RuleSet,
    updated_at: DateTime<Utc>,
}

/// Rule sets of every known tenant, seeded from the site file.
///
/// Updates replace a whole settings group atomically; readers never observe a
/// half-written group.
pub struct SettingsStore {
    tenants: RwLock<HashMap<TenantId, StoredRules>>,
}

impl SettingsStore {
    pub fn new(rules: impl IntoIterator<Item = (TenantId, RuleSet)>) -> Self {
        let now = Utc::now();
        let tenants = rules
            .into_iter()
            .map(|(tenant_id, rules)| {
                (
                    tenant_id,
                    StoredRules {
                        rules,
                        updated_at: now,
                    },
                )
            })
            .collect();

        Self {
            tenants: RwLock::new(tenants),
        }
    }

    pub fn from_definition(site: &SiteDefinition) -> Self {
        Self::new(
            site.tenants
                .iter()
                .map(|t| (t.tenant.id, t.rules.clone())),
        )
    }

    /// When the tenant's settings were last replaced.
    pub fn updated_at(&self, tenant_id: TenantId) -> Option<DateTime<Utc>> {
        self.tenants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tenant_id)
            .map(|stored| stored.updated_at)
    }

    fn modify(
        &self,
        tenant_id: TenantId,
        scope: SettingsScope,
        apply: impl FnOnce(&mut RuleSet),
    ) -> Result<SettingsChanged, RewriteError> {
        let mut tenants = self.tenants.write().unwrap_or_else(PoisonError::into_inner);
        let stored = tenants
            .get_mut(&tenant_id)
            .ok_or(RewriteError::ConfigUnavailable(tenant_id))?;

        apply(&mut stored.rules);
        let event = SettingsChanged::new(tenant_id, scope);
        stored.updated_at = event.changed_at;

        info!(tenant_id, scope = scope.as_str(), "URL settings updated");
        Ok(event)
    }
}

impl SettingsRepository for SettingsStore {
    fn load_rule_set(&self, tenant_id: TenantId) -> Result<RuleSet, RewriteError> {
        self.tenants
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&tenant_id)
            .map(|stored| stored.rules.clone())
            .ok_or(RewriteError::ConfigUnavailable(tenant_id))
    }

    fn update_general(
        &self,
        tenant_id: TenantId,
        settings: GeneralSettings,
    ) -> Result<SettingsChanged, RewriteError> {
        self.modify(tenant_id, SettingsScope::General, |rules| {
            rules.general = settings
        })
    }

    fn update_regex(
        &self,
        tenant_id: TenantId,
        settings: RegexSettings,
    ) -> Result<SettingsChanged, RewriteError> {
        self.modify(tenant_id, SettingsScope::Regex, |rules| {
            rules.patterns = settings
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_unknown_tenant() {
        let store = SettingsStore::new([(0, RuleSet::default())]);
        assert_eq!(
            store.load_rule_set(5).unwrap_err(),
            RewriteError::ConfigUnavailable(5)
        );
    }

    #[test]
    fn test_update_general_replaces_group() {
        let store = SettingsStore::new([(0, RuleSet::default())]);
        let settings = GeneralSettings {
            force_lower_case: true,
            ..Default::default()
        };

        let event = store.update_general(0, settings.clone()).unwrap();

        assert_eq!(event.tenant_id, 0);
        assert_eq!(event.scope, SettingsScope::General);
        assert_eq!(store.load_rule_set(0).unwrap().general, settings);
        assert_eq!(store.updated_at(0), Some(event.changed_at));
    }

    #[test]
    fn test_update_regex_keeps_general() {
        let mut rules = RuleSet::default();
        rules.general.auto_ascii_convert = true;
        let store = SettingsStore::new([(0, rules)]);

        let patterns = RegexSettings {
            ignore: r"\.axd$".to_string(),
            ..Default::default()
        };
        store.update_regex(0, patterns.clone()).unwrap();

        let loaded = store.load_rule_set(0).unwrap();
        assert_eq!(loaded.patterns, patterns);
        assert!(loaded.general.auto_ascii_convert);
    }

    #[test]
    fn test_update_unknown_tenant() {
        let store = SettingsStore::new([]);
        assert!(matches!(
            store.update_regex(1, RegexSettings::default()),
            Err(RewriteError::ConfigUnavailable(1))
        ));
    }
}
