//! CLI administration tool for friendly-urls.
//!
//! Runs the pattern validator and the two test tools against a site file
//! without starting the HTTP server.
//!
//! # Usage
//!
//! ```bash
//! # Validate the regex settings of every tenant
//! cargo run --bin admin -- --site site.example.json validate
//!
//! # Build the friendly URLs of page 53 under every alias of tenant 0
//! cargo run --bin admin -- test-url --tenant 0 --page 53 --query "ab=cd" --name test-page
//!
//! # Evaluate a request URI
//! cargo run --bin admin -- test-rewrite --tenant 0 http://site.com/About-Us
//! ```
//!
//! # Environment Variables
//!
//! - `SITE_FILE`: used when `--site` is not given

use friendly_urls::domain::entities::{PageId, TenantId, ValidationResult};
use friendly_urls::engine::{NONE, validate_patterns};
use friendly_urls::infrastructure::cache::NullCache;
use friendly_urls::infrastructure::memory::SiteDefinition;
use friendly_urls::state::AppState;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::sync::Arc;

/// CLI tool for checking friendly URL settings.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// JSON site definition
    #[arg(long, env = "SITE_FILE")]
    site: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the regex settings of every tenant
    Validate,

    /// Build the friendly URL of a page under every alias
    TestUrl {
        #[arg(short, long, default_value_t = 0)]
        tenant: TenantId,

        #[arg(short, long)]
        page: PageId,

        /// Query string to append, e.g. "ab=cd"
        #[arg(short, long, default_value = "")]
        query: String,

        /// Custom page name appended as the last segment
        #[arg(short, long, default_value = "")]
        name: String,
    },

    /// Evaluate a request URI and print the diagnostics record
    TestRewrite {
        #[arg(short, long, default_value_t = 0)]
        tenant: TenantId,

        uri: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let site = SiteDefinition::from_file(&cli.site)
        .with_context(|| format!("Failed to load site from {}", cli.site.display()))?;

    match cli.command {
        Commands::Validate => handle_validate(&site),
        Commands::TestUrl {
            tenant,
            page,
            query,
            name,
        } => handle_test_url(&site, tenant, page, &query, &name),
        Commands::TestRewrite { tenant, uri } => handle_test_rewrite(&site, tenant, &uri),
    }
}

fn handle_validate(site: &SiteDefinition) -> Result<()> {
    let mut invalid = 0;

    for definition in &site.tenants {
        let tenant = &definition.tenant;
        match validate_patterns(&definition.rules.patterns) {
            ValidationResult::Valid => {
                println!(
                    "{} {} ({})",
                    "✓".green(),
                    tenant.name.bold(),
                    tenant.id
                );
            }
            ValidationResult::Invalid(errors) => {
                invalid += 1;
                println!("{} {} ({})", "✗".red(), tenant.name.bold(), tenant.id);
                for (field, message) in errors.iter() {
                    println!("    {} {}", format!("{}:", field.name()).yellow(), message);
                }
            }
        }
    }

    if invalid > 0 {
        anyhow::bail!("{} tenant(s) have invalid regex settings", invalid);
    }

    println!(
        "\n{}",
        format!("All {} tenant(s) valid", site.tenants.len()).green()
    );
    Ok(())
}

fn handle_test_url(
    site: &SiteDefinition,
    tenant: TenantId,
    page: PageId,
    query: &str,
    name: &str,
) -> Result<()> {
    let state = AppState::new(site, Arc::new(NullCache::new()));

    let urls = state
        .url_test_service
        .build_friendly_urls(page, query, name, tenant)?;

    if urls.is_empty() {
        println!("{}", "Tenant has no aliases".yellow());
        return Ok(());
    }

    for url in urls {
        println!("{}", url.cyan());
    }
    Ok(())
}

fn handle_test_rewrite(site: &SiteDefinition, tenant: TenantId, uri: &str) -> Result<()> {
    let state = AppState::new(site, Arc::new(NullCache::new()));

    let report = state.url_test_service.evaluate_rewrite(uri, tenant);

    let rows = [
        ("Rewriting result", &report.rewriting_result),
        ("Culture", &report.culture),
        ("Identified page", &report.identified_page),
        ("Redirection reason", &report.redirection_reason),
        ("Redirection result", &report.redirection_result),
    ];

    for (label, value) in rows {
        let value = if value == NONE {
            value.dimmed()
        } else {
            value.normal()
        };
        println!("{:<20} {}", format!("{label}:").bold(), value);
    }

    println!("\n{}", "Operation messages:".bold());
    for line in report.operation_messages.lines() {
        println!("  {}", line);
    }
    Ok(())
}
