//! CLI administration tool for shortcode-service.
//!
//! Inspects and maintains stored records and the cache without going through
//! the HTTP API. Mutations go through the same mapping service as the server,
//! so cache entries are kept consistent.
//!
//! # Usage
//!
//! ```bash
//! # List every record with its access counter
//! cargo run --bin admin -- records list
//!
//! # Show one record
//! cargo run --bin admin -- records show 100680
//!
//! # Delete a record (asks for confirmation)
//! cargo run --bin admin -- records delete 100680
//!
//! # Rebuild the cached all_records snapshot from the store
//! cargo run --bin admin -- cache refresh
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`), `REDIS_URL` (or `REDIS_*`),
//! `CACHE_BACKEND`, `CACHE_KEY_PREFIX`.

use shortcode_service::application::services::MappingService;
use shortcode_service::config;
use shortcode_service::infrastructure::persistence::PgUrlRepository;
use shortcode_service::server::{build_cache, connect_database};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortcode-service.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Inspect and manage stored records
    Records {
        #[command(subcommand)]
        action: RecordsAction,
    },

    /// Cache maintenance
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum RecordsAction {
    /// List all records
    List,

    /// Show one record
    Show {
        /// Shortcode to look up
        shortcode: String,
    },

    /// Delete a record and its cache entries
    Delete {
        /// Shortcode to delete
        shortcode: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum CacheAction {
    /// Recompute the all_records snapshot from the store
    Refresh,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

type Service = MappingService<PgUrlRepository>;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = connect_database(&config).await?;

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Records { action } => {
            let service = build_service(&config, pool).await?;
            handle_records_action(action, &service).await?;
        }
        Commands::Cache { action } => {
            let service = build_service(&config, pool).await?;
            handle_cache_action(action, &service).await?;
        }
    }

    Ok(())
}

async fn build_service(config: &config::Config, pool: PgPool) -> Result<Service> {
    let cache = build_cache(config).await?;
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));
    Ok(MappingService::new(repository, cache))
}

async fn handle_records_action(action: RecordsAction, service: &Service) -> Result<()> {
    match action {
        RecordsAction::List => list_records(service).await,
        RecordsAction::Show { shortcode } => show_record(service, &shortcode).await,
        RecordsAction::Delete { shortcode, yes } => {
            delete_record(service, &shortcode, yes).await
        }
    }
}

/// Lists all records.
///
/// # Output Format
///
/// ```text
/// URL Records
///
///   Code    Hits      Updated            URL
///   ────────────────────────────────────────────────────────────────
///   100680  12        2025-01-15 10:30   https://example.com
/// ```
async fn list_records(service: &Service) -> Result<()> {
    println!("{}", "URL Records".bright_blue().bold());
    println!();

    let records = service.records().await?;

    if records.is_empty() {
        println!("{}", "  No records found".yellow());
        return Ok(());
    }

    println!(
        "  {:<8} {:<9} {:<18} {}",
        "Code".bright_white().bold(),
        "Hits".bright_white().bold(),
        "Updated".bright_white().bold(),
        "URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<8} {:<9} {:<18} {}",
            record.shortcode.cyan(),
            record.access_count.to_string().bright_green(),
            record
                .updated_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            record.url
        );
    }

    println!();
    println!(
        "  Total: {}",
        records.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

async fn show_record(service: &Service, shortcode: &str) -> Result<()> {
    let record = service.stats(shortcode).await?;

    println!("{}", "URL Record".bright_blue().bold());
    println!();
    println!("  Code:     {}", record.shortcode.cyan());
    println!("  URL:      {}", record.url.bright_white());
    println!(
        "  Hits:     {}",
        record.access_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:  {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S").to_string()
    );
    println!(
        "  Updated:  {}",
        record.updated_at.format("%Y-%m-%d %H:%M:%S").to_string()
    );
    println!();

    Ok(())
}

/// Deletes a record after confirmation (default: No).
async fn delete_record(service: &Service, shortcode: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "Delete URL Record".bright_blue().bold());
    println!();

    let record = service.stats(shortcode).await?;
    println!("  Code: {}", record.shortcode.cyan());
    println!("  URL:  {}", record.url.bright_white());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this record?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".red());
            return Ok(());
        }
    }

    let confirmation = service.delete(shortcode).await?;

    println!("{}", confirmation.message().green().bold());
    println!();

    Ok(())
}

async fn handle_cache_action(action: CacheAction, service: &Service) -> Result<()> {
    match action {
        CacheAction::Refresh => {
            println!(
                "{} ({})",
                "Refreshing all_records snapshot...".bright_blue(),
                service.cache().backend()
            );

            let summaries = service.refresh_snapshot().await?;

            println!(
                "{} {} records cached",
                "Done:".green().bold(),
                summaries.len().to_string().bright_white().bold()
            );
        }
    }

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let records: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM url_store")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Records:    {}", records.to_string().bright_green().bold());
            println!();
        }
    }

    Ok(())
}
