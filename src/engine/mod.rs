//! The rewriting core: pattern compilation, friendly URL generation and
//! request evaluation.
//!
//! Everything here is synchronous and free of I/O. Settings, pages and
//! aliases arrive through the traits in [`crate::domain::repositories`].

pub mod diagnostics;
pub mod patterns;
pub mod rewriter;
pub mod url_builder;

pub use diagnostics::{DiagnosticsReport, NONE, report};
pub use patterns::{CompiledRules, compile_pattern, validate_patterns};
pub use rewriter::RewriteEngine;
pub use url_builder::{DEFAULT_PAGE_NAME, UrlBuilder};
