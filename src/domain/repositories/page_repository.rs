//! Repository trait for page lookups.

use crate::domain::entities::{PageId, PageRecord, TenantId};

/// Resolves pages in both directions.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::SiteDirectory`] - In-memory page index
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
pub trait PageRepository: Send + Sync {
    /// Finds a page by id. Deleted pages are still returned.
    fn resolve_page(&self, page_id: PageId, tenant_id: TenantId) -> Option<PageRecord>;

    /// Finds the page whose friendly path is exactly `path`.
    ///
    /// `path` starts with `/`, has no trailing slash and may contain
    /// percent-encoded characters.
    fn resolve_path(&self, path: &str, tenant_id: TenantId) -> Option<PageRecord>;
}
