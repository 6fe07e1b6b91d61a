//! Caching of compiled rule sets.
//!
//! Provides a [`RuleSetCache`] trait with two implementations:
//! - [`MemoryRuleSetCache`] - Process-local map invalidated by settings events
//! - [`NullCache`] - No-op implementation for disabled caching

mod memory_cache;
mod null_cache;
mod service;

pub use memory_cache::MemoryRuleSetCache;
pub use null_cache::NullCache;
pub use service::RuleSetCache;
