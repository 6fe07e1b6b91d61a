//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ```bash
//! export SITE_FILE="./site.example.json"
//! export LISTEN="127.0.0.1:8080"
//! export LOG_FORMAT="json"
//! ```
//!
//! ## Required Variables
//!
//! - `SITE_FILE` - Path to the JSON site definition (tenants, aliases, pages, rules)
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `RULE_CACHE` - Cache compiled rule sets between requests (default: `true`)
//! - `BEHIND_PROXY` - Take the rate-limit key from forwarding headers (default: `false`)

use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub site_file: PathBuf,
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    /// When false, rule sets are compiled on every evaluation.
    pub rule_cache: bool,
    /// When true, rate limiting reads client IP from X-Forwarded-For / X-Real-IP headers.
    /// Enable only when the service is behind a trusted reverse proxy.
    pub behind_proxy: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if `SITE_FILE` is not set.
    pub fn from_env() -> Result<Self> {
        let site_file = env::var("SITE_FILE")
            .map(PathBuf::from)
            .context("SITE_FILE must be set")?;

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let rule_cache = env_flag("RULE_CACHE").unwrap_or(true);
        let behind_proxy = env_flag("BEHIND_PROXY").unwrap_or(false);

        Ok(Self {
            site_file,
            listen_addr,
            log_level,
            log_format,
            rule_cache,
            behind_proxy,
        })
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - `site_file` is empty
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        if self.site_file.as_os_str().is_empty() {
            anyhow::bail!("SITE_FILE must not be empty");
        }

        Ok(())
    }

    /// Prints configuration summary.
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Site file: {}", self.site_file.display());
        tracing::info!(
            "  Rule cache: {}",
            if self.rule_cache { "enabled" } else { "disabled" }
        );
        tracing::info!("  Behind proxy: {}", self.behind_proxy);
        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Reads a boolean variable; `true`/`1` and `false`/`0`, case-insensitive.
fn env_flag(name: &str) -> Option<bool> {
    let value = env::var(name).ok()?;
    if value.eq_ignore_ascii_case("true") || value == "1" {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") || value == "0" {
        Some(false)
    } else {
        tracing::warn!("Ignoring {}='{}', expected true or false", name, value);
        None
    }
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
