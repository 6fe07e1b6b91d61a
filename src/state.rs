//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::{SettingsService, UrlTestService};
use crate::infrastructure::cache::RuleSetCache;
use crate::infrastructure::localization::StaticReasonText;
use crate::infrastructure::memory::{SettingsStore, SiteDefinition, SiteDirectory};

pub type SiteSettingsService = SettingsService<SettingsStore>;
pub type SiteUrlTestService = UrlTestService<SettingsStore, SiteDirectory, SiteDirectory>;

#[derive(Clone)]
pub struct AppState {
    pub settings_service: Arc<SiteSettingsService>,
    pub url_test_service: Arc<SiteUrlTestService>,
    pub store: Arc<SettingsStore>,
    pub site: Arc<SiteDirectory>,
    pub cache: Arc<dyn RuleSetCache>,
}

impl AppState {
    /// Wires the in-memory collaborators for `site` into both services.
    pub fn new(site: &SiteDefinition, cache: Arc<dyn RuleSetCache>) -> Self {
        let store = Arc::new(SettingsStore::from_definition(site));
        let directory = Arc::new(SiteDirectory::from_definition(site));

        let settings_service = Arc::new(SettingsService::new(store.clone(), cache.clone()));
        let url_test_service = Arc::new(UrlTestService::new(
            store.clone(),
            directory.clone(),
            directory.clone(),
            cache.clone(),
            Arc::new(StaticReasonText),
        ));

        Self {
            settings_service,
            url_test_service,
            store,
            site: directory,
            cache,
        }
    }
}
