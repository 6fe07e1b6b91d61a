//! In-memory page and tenant lookups.

use std::collections::HashMap;

use percent_encoding::percent_decode_str;

use super::site_definition::SiteDefinition;
use crate::domain::entities::{AliasSet, PageId, PageRecord, Tenant, TenantId};
use crate::domain::errors::RewriteError;
use crate::domain::repositories::{PageRepository, TenantRepository};
use crate::utils::transliterate::to_ascii;

struct TenantPages {
    tenant: Tenant,
    aliases: AliasSet,
    pages: HashMap<PageId, PageRecord>,
    by_path: HashMap<String, PageId>,
}

/// Tenants, aliases and pages loaded from the site file.
///
/// Friendly path lookups compare a loose key: percent escapes decoded, text
/// folded to ASCII and lower case, and every character other than letters,
/// digits and `/` removed. A page named `About Us` is therefore found by
/// `/About-Us`, `/about_us` and `/aboutus` alike, whatever space replacement
/// the tenant uses.
pub struct SiteDirectory {
    tenants: HashMap<TenantId, TenantPages>,
}

impl SiteDirectory {
    pub fn from_definition(site: &SiteDefinition) -> Self {
        let tenants = site
            .tenants
            .iter()
            .map(|definition| {
                let tenant_id = definition.tenant.id;
                let mut pages = HashMap::new();
                let mut by_path = HashMap::new();

                for page in &definition.pages {
                    let record = page.to_record(tenant_id);
                    let key = path_key(&record.path);
                    if !key.is_empty() {
                        by_path.entry(key).or_insert(record.id);
                    }
                    pages.insert(record.id, record);
                }

                (
                    tenant_id,
                    TenantPages {
                        tenant: definition.tenant.clone(),
                        aliases: definition.aliases.clone(),
                        pages,
                        by_path,
                    },
                )
            })
            .collect();

        Self { tenants }
    }

    pub fn tenant_ids(&self) -> Vec<TenantId> {
        let mut ids: Vec<_> = self.tenants.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn page_count(&self) -> usize {
        self.tenants.values().map(|t| t.pages.len()).sum()
    }
}

impl PageRepository for SiteDirectory {
    fn resolve_page(&self, page_id: PageId, tenant_id: TenantId) -> Option<PageRecord> {
        self.tenants
            .get(&tenant_id)?
            .pages
            .get(&page_id)
            .cloned()
    }

    fn resolve_path(&self, path: &str, tenant_id: TenantId) -> Option<PageRecord> {
        let entry = self.tenants.get(&tenant_id)?;
        let page_id = entry.by_path.get(&path_key(path))?;
        entry.pages.get(page_id).cloned()
    }
}

impl TenantRepository for SiteDirectory {
    fn load_tenant(&self, tenant_id: TenantId) -> Result<Tenant, RewriteError> {
        self.tenants
            .get(&tenant_id)
            .map(|entry| entry.tenant.clone())
            .ok_or(RewriteError::ConfigUnavailable(tenant_id))
    }

    fn list_aliases(&self, tenant_id: TenantId) -> AliasSet {
        self.tenants
            .get(&tenant_id)
            .map(|entry| entry.aliases.clone())
            .unwrap_or_default()
    }
}

/// Loose comparison key of a page path. Empty for the site root.
fn path_key(path: &str) -> String {
    let decoded = percent_decode_str(path).decode_utf8_lossy();
    to_ascii(&decoded)
        .to_ascii_lowercase()
        .split('/')
        .map(|segment| {
            segment
                .chars()
                .filter(char::is_ascii_alphanumeric)
                .collect::<String>()
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
