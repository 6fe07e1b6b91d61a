//! Core domain entities of the friendly-URL subsystem.
//!
//! Entities are plain data structures. The rewriting logic that consumes them
//! lives in [`crate::engine`].
//!
//! # Entity Types
//!
//! - [`RuleSet`] - Per-tenant rewriting rules ([`GeneralSettings`] + [`RegexSettings`])
//! - [`PageRecord`] - A page resolved through the host's page lookup
//! - [`Tenant`] / [`AliasSet`] - A site and the host names it answers on
//! - [`RewriteDecision`] - Outcome of evaluating one request URI
//! - [`ValidationResult`] - Outcome of validating regex settings

pub mod decision;
pub mod page;
pub mod rule_set;
pub mod tenant;
pub mod validation;

pub use decision::{ReasonCode, RewriteAction, RewriteDecision};
pub use page::{PageId, PageRecord, PageReference, TenantId};
pub use rule_set::{
    DeletedPageHandling, GeneralSettings, PatternField, RegexSettings, ReplaceSpaceWith, RuleSet,
};
pub use tenant::{AliasSet, PortalAlias, Tenant, TenantContext};
pub use validation::{FieldError, FieldErrors, ValidationResult};
