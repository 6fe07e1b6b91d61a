//! JSON description of the tenants, pages and rules served by the process.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::domain::entities::{AliasSet, PageId, PageRecord, RuleSet, Tenant, TenantId};

/// Errors raised while loading a site file.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("Failed to read site file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid site definition: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Tenant {0} is defined more than once")]
    DuplicateTenant(TenantId),

    #[error("Page {page_id} is defined more than once in tenant {tenant_id}")]
    DuplicatePage { tenant_id: TenantId, page_id: PageId },
}

/// A page entry; its tenant is implied by the enclosing tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageDefinition {
    pub id: PageId,
    pub name: String,
    #[serde(default)]
    pub path: String,
    #[serde(default)]
    pub locale: Option<String>,
    #[serde(default)]
    pub deleted: bool,
}

impl PageDefinition {
    pub fn to_record(&self, tenant_id: TenantId) -> PageRecord {
        PageRecord {
            id: self.id,
            tenant_id,
            name: self.name.clone(),
            path: self.path.clone(),
            locale: self.locale.clone(),
            deleted: self.deleted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TenantDefinition {
    #[serde(flatten)]
    pub tenant: Tenant,
    #[serde(default)]
    pub aliases: AliasSet,
    #[serde(default)]
    pub pages: Vec<PageDefinition>,
    #[serde(default)]
    pub rules: RuleSet,
}

/// Root of the site file.
///
/// # Example
///
/// ```json
/// {
///   "tenants": [{
///     "id": 0,
///     "name": "Main",
///     "home_page_id": 1,
///     "aliases": [{ "http_alias": "site.com", "is_primary": true }],
///     "pages": [
///       { "id": 1, "name": "Home", "path": "" },
///       { "id": 53, "name": "About Us", "path": "/About Us" }
///     ],
///     "rules": { "general": { "force_lower_case": true } }
///   }]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SiteDefinition {
    #[serde(default)]
    pub tenants: Vec<TenantDefinition>,
}

impl SiteDefinition {
    /// Reads and checks a site file.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] if the file cannot be read, is not valid JSON or
    /// repeats a tenant or page id.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SiteError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SiteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Parses and checks a site definition.
    ///
    /// # Errors
    ///
    /// See [`SiteDefinition::from_file`].
    pub fn from_json(text: &str) -> Result<Self, SiteError> {
        let site: Self = serde_json::from_str(text)?;
        site.check_unique_ids()?;
        Ok(site)
    }

    pub fn tenant(&self, tenant_id: TenantId) -> Option<&TenantDefinition> {
        self.tenants.iter().find(|t| t.tenant.id == tenant_id)
    }

    fn check_unique_ids(&self) -> Result<(), SiteError> {
        let mut tenants = HashSet::new();
        for definition in &self.tenants {
            let tenant_id = definition.tenant.id;
            if !tenants.insert(tenant_id) {
                return Err(SiteError::DuplicateTenant(tenant_id));
            }

            let mut pages = HashSet::new();
            for page in &definition.pages {
                if !pages.insert(page.id) {
                    return Err(SiteError::DuplicatePage {
                        tenant_id,
                        page_id: page.id,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SITE: &str = r#"{
        "tenants": [{
            "id": 0,
            "name": "Main",
            "home_page_id": 1,
            "aliases": [{ "http_alias": "site.com", "is_primary": true }],
            "pages": [
                { "id": 1, "name": "Home" },
                { "id": 53, "name": "About Us", "path": "/About Us" }
            ],
            "rules": { "general": { "force_lower_case": true } }
        }]
    }"#;

    #[test]
    fn test_parse_site() {
        let site = SiteDefinition::from_json(SITE).unwrap();
        let main = site.tenant(0).unwrap();

        assert_eq!(main.tenant.name, "Main");
        assert_eq!(main.aliases.len(), 1);
        assert_eq!(main.pages[1].to_record(0).path, "/About Us");
        assert!(main.rules.general.force_lower_case);
        assert!(site.tenant(1).is_none());
    }

    #[test]
    fn test_duplicate_tenant_rejected() {
        let text = r#"{"tenants": [
            {"id": 0, "name": "A", "home_page_id": null},
            {"id": 0, "name": "B", "home_page_id": null}
        ]}"#;

        assert!(matches!(
            SiteDefinition::from_json(text),
            Err(SiteError::DuplicateTenant(0))
        ));
    }

    #[test]
    fn test_duplicate_page_rejected() {
        let text = r#"{"tenants": [{"id": 2, "name": "A", "home_page_id": 1, "pages": [
            {"id": 1, "name": "Home"}, {"id": 1, "name": "Again"}
        ]}]}"#;

        assert!(matches!(
            SiteDefinition::from_json(text),
            Err(SiteError::DuplicatePage {
                tenant_id: 2,
                page_id: 1
            })
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SITE.as_bytes()).unwrap();

        let site = SiteDefinition::from_file(file.path()).unwrap();
        assert_eq!(site.tenants.len(), 1);
    }

    #[test]
    fn test_missing_file() {
        let result = SiteDefinition::from_file("/nonexistent/site.json");
        assert!(matches!(result, Err(SiteError::Io { .. })));
    }
}
