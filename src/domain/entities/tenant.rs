//! Tenants (portals) and the host aliases bound to them.

use serde::{Deserialize, Serialize};

use super::page::{PageId, TenantId};

/// An isolated site within the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tenant {
    pub id: TenantId,
    pub name: String,
    pub home_page_id: Option<PageId>,
    #[serde(default)]
    pub default_locale: Option<String>,
    #[serde(default)]
    pub locales: Vec<String>,
    #[serde(default)]
    pub use_ssl: bool,
}

impl Tenant {
    /// URL scheme used for outbound URLs.
    pub fn scheme(&self) -> &'static str {
        if self.use_ssl { "https" } else { "http" }
    }

    /// Returns the configured locale equal to `segment`, ignoring case.
    pub fn find_locale(&self, segment: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|locale| locale.eq_ignore_ascii_case(segment))
            .map(String::as_str)
    }
}

/// A domain name (optionally with port and child path) bound to a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortalAlias {
    pub http_alias: String,
    #[serde(default)]
    pub is_primary: bool,
}

impl PortalAlias {
    pub fn new(http_alias: impl Into<String>) -> Self {
        Self {
            http_alias: http_alias.into(),
            is_primary: false,
        }
    }

    /// Child path of the alias without leading or trailing slashes, if any.
    pub fn child_path(&self) -> Option<&str> {
        self.http_alias
            .split_once('/')
            .map(|(_, child)| child.trim_matches('/'))
            .filter(|child| !child.is_empty())
    }
}

/// Ordered aliases of a tenant.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AliasSet(Vec<PortalAlias>);

impl AliasSet {
    pub fn new(aliases: Vec<PortalAlias>) -> Self {
        Self(aliases)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PortalAlias> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The alias flagged primary, or the first one.
    pub fn primary(&self) -> Option<&PortalAlias> {
        self.0
            .iter()
            .find(|alias| alias.is_primary)
            .or_else(|| self.0.first())
    }

    /// Finds the longest alias that prefixes `host_and_path` (e.g. `site.com/child/page`).
    ///
    /// Comparison ignores ASCII case and requires the alias to end on a
    /// segment boundary.
    pub fn matching(&self, host_and_path: &str) -> Option<&PortalAlias> {
        let candidate = host_and_path.to_ascii_lowercase();
        self.0
            .iter()
            .filter(|alias| {
                let alias = alias.http_alias.trim_end_matches('/').to_ascii_lowercase();
                candidate == alias
                    || candidate
                        .strip_prefix(&alias)
                        .is_some_and(|rest| rest.starts_with('/'))
            })
            .max_by_key(|alias| alias.http_alias.len())
    }
}

/// Everything the engine needs to know about the tenant being served.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TenantContext {
    pub tenant: Tenant,
    pub aliases: AliasSet,
}

impl TenantContext {
    pub fn new(tenant: Tenant, aliases: AliasSet) -> Self {
        Self { tenant, aliases }
    }
}

impl<'a> IntoIterator for &'a AliasSet {
    type Item = &'a PortalAlias;
    type IntoIter = std::slice::Iter<'a, PortalAlias>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
