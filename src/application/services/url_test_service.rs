//! Friendly URL generation and rewrite diagnostics.

use std::sync::Arc;

use tracing::debug;

use crate::application::metrics::record_decision;
use crate::domain::entities::{PageId, PageReference, RewriteDecision, TenantContext, TenantId};
use crate::domain::errors::RewriteError;
use crate::domain::repositories::{
    PageRepository, ReasonLocalizer, SettingsRepository, TenantRepository,
};
use crate::engine::{CompiledRules, DiagnosticsReport, RewriteEngine, UrlBuilder, report};
use crate::infrastructure::cache::RuleSetCache;

/// Runs the URL builder and the rewrite engine against a tenant's current
/// rules.
///
/// Compiled rules are taken from the cache when present; otherwise the rule
/// set is loaded, compiled once and cached unless the tenant's settings
/// changed while it was being compiled.
pub struct UrlTestService<S, P, T>
where
    S: SettingsRepository,
    P: PageRepository,
    T: TenantRepository,
{
    settings: Arc<S>,
    pages: Arc<P>,
    tenants: Arc<T>,
    cache: Arc<dyn RuleSetCache>,
    localizer: Arc<dyn ReasonLocalizer>,
}

impl<S, P, T> UrlTestService<S, P, T>
where
    S: SettingsRepository,
    P: PageRepository,
    T: TenantRepository,
{
    /// Creates a new URL test service.
    pub fn new(
        settings: Arc<S>,
        pages: Arc<P>,
        tenants: Arc<T>,
        cache: Arc<dyn RuleSetCache>,
        localizer: Arc<dyn ReasonLocalizer>,
    ) -> Self {
        Self {
            settings,
            pages,
            tenants,
            cache,
            localizer,
        }
    }

    /// Compiled rules of a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] for unknown tenants and
    /// [`RewriteError::ConfigInvalid`] if stored patterns do not compile.
    pub fn compiled_rules(&self, tenant_id: TenantId) -> Result<Arc<CompiledRules>, RewriteError> {
        if let Some(rules) = self.cache.get(tenant_id) {
            return Ok(rules);
        }

        let generation = self.cache.generation(tenant_id);
        let rule_set = self.settings.load_rule_set(tenant_id)?;
        let rules = Arc::new(CompiledRules::compile(rule_set)?);
        debug!(tenant_id, generation, "Compiled URL rules");
        self.cache.put(tenant_id, generation, rules.clone());
        Ok(rules)
    }

    fn context(&self, tenant_id: TenantId) -> Result<TenantContext, RewriteError> {
        let tenant = self.tenants.load_tenant(tenant_id)?;
        let aliases = self.tenants.list_aliases(tenant_id);
        Ok(TenantContext::new(tenant, aliases))
    }

    /// Builds the friendly URL of a page under every alias of the tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::PageNotFound`] for unknown pages and the
    /// errors of [`Self::compiled_rules`].
    pub fn build_friendly_urls(
        &self,
        page_id: PageId,
        query_string: &str,
        custom_page_name: &str,
        tenant_id: TenantId,
    ) -> Result<Vec<String>, RewriteError> {
        let rules = self.compiled_rules(tenant_id)?;
        let context = self.context(tenant_id)?;

        UrlBuilder::new(&rules, context.tenant.scheme()).build_all(
            self.pages.as_ref(),
            PageReference::new(page_id, tenant_id),
            query_string,
            custom_page_name,
            &context.aliases,
        )
    }

    /// Evaluates a request URI and returns the raw decision.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::MalformedInput`] for URIs that cannot be
    /// parsed and the errors of [`Self::compiled_rules`].
    pub fn evaluate(&self, uri: &str, tenant_id: TenantId) -> Result<RewriteDecision, RewriteError> {
        let rules = self.compiled_rules(tenant_id)?;
        let context = self.context(tenant_id)?;

        RewriteEngine::new(&rules, &context, self.pages.as_ref()).evaluate(uri)
    }

    /// Evaluates a request URI and flattens the outcome for display.
    ///
    /// Never fails; errors are reported inside the returned record.
    pub fn evaluate_rewrite(&self, uri: &str, tenant_id: TenantId) -> DiagnosticsReport {
        let outcome = self.evaluate(uri, tenant_id);

        match &outcome {
            Ok(decision) => record_decision(decision.reason().as_str()),
            Err(e) => {
                debug!(tenant_id, uri, "Rewrite evaluation failed: {}", e);
                record_decision("error");
            }
        }

        report(&outcome, self.localizer.as_ref())
    }
}
