//! General and regex settings management.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::application::metrics::record_settings_update;
use crate::domain::entities::{
    GeneralSettings, RegexSettings, ReplaceSpaceWith, TenantId, ValidationResult,
};
use crate::domain::errors::RewriteError;
use crate::domain::repositories::SettingsRepository;
use crate::domain::settings_event::SettingsChanged;
use crate::engine::validate_patterns;
use crate::infrastructure::cache::RuleSetCache;

/// Service for reading and replacing a tenant's URL settings.
///
/// Every successful update is forwarded to the rule cache as a
/// [`SettingsChanged`] event, so the next evaluation sees the new rules.
pub struct SettingsService<R: SettingsRepository> {
    repository: Arc<R>,
    cache: Arc<dyn RuleSetCache>,
}

impl<R: SettingsRepository> SettingsService<R> {
    /// Creates a new settings service.
    pub fn new(repository: Arc<R>, cache: Arc<dyn RuleSetCache>) -> Self {
        Self { repository, cache }
    }

    /// Current general settings of a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] for unknown tenants.
    pub fn general_settings(&self, tenant_id: TenantId) -> Result<GeneralSettings, RewriteError> {
        Ok(self.repository.load_rule_set(tenant_id)?.general)
    }

    /// Replaces the general settings of a tenant.
    ///
    /// When `system_generated_urls` is off, spaces are no longer replaced and
    /// `replace_space_with` is stored as [`ReplaceSpaceWith::None`].
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] for unknown tenants.
    pub fn update_general_settings(
        &self,
        tenant_id: TenantId,
        mut settings: GeneralSettings,
        system_generated_urls: bool,
    ) -> Result<SettingsChanged, RewriteError> {
        if !system_generated_urls {
            settings.replace_space_with = ReplaceSpaceWith::None;
        }

        let event = self
            .repository
            .update_general(tenant_id, settings)
            .inspect_err(|_| record_settings_update("general", "failed"))?;

        self.cache.on_settings_changed(&event);
        record_settings_update("general", "applied");
        Ok(event)
    }

    /// Current regex settings of a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] for unknown tenants.
    pub fn regex_settings(&self, tenant_id: TenantId) -> Result<RegexSettings, RewriteError> {
        Ok(self.repository.load_rule_set(tenant_id)?.patterns)
    }

    /// Checks every pattern without storing anything.
    pub fn validate(&self, settings: &RegexSettings) -> ValidationResult {
        validate_patterns(settings)
    }

    /// Validates and, if every pattern compiles, replaces the regex settings.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigInvalid`] listing every invalid field;
    /// nothing is stored in that case.
    /// Returns [`RewriteError::ConfigUnavailable`] for unknown tenants.
    pub fn update_regex_settings(
        &self,
        tenant_id: TenantId,
        settings: RegexSettings,
    ) -> Result<SettingsChanged, RewriteError> {
        if let ValidationResult::Invalid(errors) = self.validate(&settings) {
            warn!(tenant_id, "Rejected regex settings: {}", errors);
            record_settings_update("regex", "rejected");
            return Err(RewriteError::ConfigInvalid(errors));
        }

        let event = self
            .repository
            .update_regex(tenant_id, settings)
            .inspect_err(|_| record_settings_update("regex", "failed"))?;

        debug!(tenant_id, "Regex settings stored, invalidating cached rules");
        self.cache.on_settings_changed(&event);
        record_settings_update("regex", "applied");
        Ok(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{PatternField, RuleSet};
    use crate::domain::repositories::MockSettingsRepository;
    use crate::domain::settings_event::SettingsScope;
    use crate::engine::CompiledRules;
    use crate::infrastructure::cache::MemoryRuleSetCache;
    use mockall::predicate::*;

    fn cache_with_tenant(tenant_id: TenantId) -> Arc<MemoryRuleSetCache> {
        let cache = Arc::new(MemoryRuleSetCache::new());
        cache.put(
            tenant_id,
            cache.generation(tenant_id),
            Arc::new(CompiledRules::compile(RuleSet::default()).unwrap()),
        );
        cache
    }

    #[test]
    fn test_general_settings_success() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo
            .expect_load_rule_set()
            .with(eq(0))
            .times(1)
            .returning(|_| {
                let mut rules = RuleSet::default();
                rules.general.force_lower_case = true;
                Ok(rules)
            });

        let service = SettingsService::new(Arc::new(mock_repo), Arc::new(MemoryRuleSetCache::new()));
        let general = service.general_settings(0).unwrap();

        assert!(general.force_lower_case);
    }

    #[test]
    fn test_general_settings_unknown_tenant() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo
            .expect_load_rule_set()
            .returning(|tenant_id| Err(RewriteError::ConfigUnavailable(tenant_id)));

        let service = SettingsService::new(Arc::new(mock_repo), Arc::new(MemoryRuleSetCache::new()));

        assert_eq!(
            service.general_settings(4).unwrap_err(),
            RewriteError::ConfigUnavailable(4)
        );
    }

    #[test]
    fn test_update_general_invalidates_cache() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo
            .expect_update_general()
            .times(1)
            .returning(|tenant_id, _| Ok(SettingsChanged::new(tenant_id, SettingsScope::General)));

        let cache = cache_with_tenant(0);
        let service = SettingsService::new(Arc::new(mock_repo), cache.clone());

        service
            .update_general_settings(0, GeneralSettings::default(), true)
            .unwrap();

        assert!(cache.get(0).is_none());
    }

    #[test]
    fn test_disabling_system_generated_urls_clears_replacement() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo
            .expect_update_general()
            .withf(|_, settings| settings.replace_space_with == ReplaceSpaceWith::None)
            .times(1)
            .returning(|tenant_id, _| Ok(SettingsChanged::new(tenant_id, SettingsScope::General)));

        let service = SettingsService::new(Arc::new(mock_repo), Arc::new(MemoryRuleSetCache::new()));
        let settings = GeneralSettings {
            replace_space_with: ReplaceSpaceWith::Underscore,
            ..Default::default()
        };

        assert!(service.update_general_settings(0, settings, false).is_ok());
    }

    #[test]
    fn test_update_regex_rejects_invalid_patterns() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo.expect_update_regex().never();

        let cache = cache_with_tenant(0);
        let service = SettingsService::new(Arc::new(mock_repo), cache.clone());
        let settings = RegexSettings {
            ignore: "(".to_string(),
            do_not_rewrite: "[".to_string(),
            no_friendly_url: "/api/".to_string(),
            ..Default::default()
        };

        match service.update_regex_settings(0, settings) {
            Err(RewriteError::ConfigInvalid(errors)) => {
                assert_eq!(errors.len(), 2);
                assert!(errors.contains(PatternField::IgnoreRegex));
                assert!(errors.contains(PatternField::DoNotRewriteRegex));
            }
            other => panic!("expected ConfigInvalid, got {other:?}"),
        }
        assert!(cache.get(0).is_some());
    }

    #[test]
    fn test_update_regex_stores_valid_patterns() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo
            .expect_update_regex()
            .withf(|tenant_id, settings| *tenant_id == 0 && settings.ignore == r"\.axd$")
            .times(1)
            .returning(|tenant_id, _| Ok(SettingsChanged::new(tenant_id, SettingsScope::Regex)));

        let cache = cache_with_tenant(0);
        let service = SettingsService::new(Arc::new(mock_repo), cache.clone());
        let settings = RegexSettings {
            ignore: r"\.axd$".to_string(),
            ..Default::default()
        };

        let event = service.update_regex_settings(0, settings).unwrap();

        assert_eq!(event.scope, SettingsScope::Regex);
        assert!(cache.get(0).is_none());
    }

    #[test]
    fn test_update_regex_unknown_tenant() {
        let mut mock_repo = MockSettingsRepository::new();
        mock_repo
            .expect_update_regex()
            .returning(|tenant_id, _| Err(RewriteError::ConfigUnavailable(tenant_id)));

        let service = SettingsService::new(Arc::new(mock_repo), Arc::new(MemoryRuleSetCache::new()));

        assert_eq!(
            service
                .update_regex_settings(8, RegexSettings::default())
                .unwrap_err(),
            RewriteError::ConfigUnavailable(8)
        );
    }
}
