//! Page references resolved through the host's page lookup.

use serde::{Deserialize, Serialize};

/// Tenant (portal) identifier.
pub type TenantId = i64;

/// Page (tab) identifier, unique within a tenant.
pub type PageId = i64;

/// Weak reference to a page owned by the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageReference {
    pub page_id: PageId,
    pub tenant_id: TenantId,
}

impl PageReference {
    pub fn new(page_id: PageId, tenant_id: TenantId) -> Self {
        Self { page_id, tenant_id }
    }
}

/// A page as reported by the page lookup collaborator.
///
/// `path` is the hierarchical path of page names (e.g. `/Products/Big Widgets`)
/// before any friendly-URL normalization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRecord {
    pub id: PageId,
    pub tenant_id: TenantId,
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl PageRecord {
    pub fn new(
        id: PageId,
        tenant_id: TenantId,
        name: impl Into<String>,
        path: impl Into<String>,
        locale: Option<String>,
    ) -> Self {
        Self {
            id,
            tenant_id,
            name: name.into(),
            path: path.into(),
            locale,
            deleted: false,
        }
    }

    /// Non-empty segments of the page path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.path.split('/').filter(|s| !s.is_empty())
    }
}
