//! Repository trait for tenants and their aliases.

use crate::domain::entities::{AliasSet, Tenant, TenantId};
use crate::domain::errors::RewriteError;

/// Tenant details needed to build and evaluate URLs.
#[cfg_attr(test, mockall::automock)]
pub trait TenantRepository: Send + Sync {
    /// Loads a tenant.
    ///
    /// # Errors
    ///
    /// Returns [`RewriteError::ConfigUnavailable`] if the tenant is unknown.
    fn load_tenant(&self, tenant_id: TenantId) -> Result<Tenant, RewriteError>;

    /// Lists the host aliases of a tenant in configured order.
    ///
    /// Unknown tenants have no aliases.
    fn list_aliases(&self, tenant_id: TenantId) -> AliasSet;
}
