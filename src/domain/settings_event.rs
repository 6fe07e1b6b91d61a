//! Change notifications emitted by the settings store.

use chrono::{DateTime, Utc};

use super::entities::TenantId;

/// Which group of settings changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsScope {
    General,
    Regex,
}

impl SettingsScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::General => "general",
            Self::Regex => "regex",
        }
    }
}

/// Emitted after a tenant's stored rules were replaced.
///
/// Holders of a cached [`crate::engine::CompiledRules`] for the tenant must
/// drop it when they receive this event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsChanged {
    pub tenant_id: TenantId,
    pub scope: SettingsScope,
    pub changed_at: DateTime<Utc>,
}

impl SettingsChanged {
    pub fn new(tenant_id: TenantId, scope: SettingsScope) -> Self {
        Self {
            tenant_id,
            scope,
            changed_at: Utc::now(),
        }
    }
}
