//! CLI administration tool for the shortener.
//!
//! Creates and inspects short links directly against the configured Redis
//! store, without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- shorten "https://example.com/some/long/path"
//!
//! # Shorten with a specific public origin
//! cargo run --bin admin -- shorten "https://example.com" --origin https://sho.rt
//!
//! # Look up where a code points
//! cargo run --bin admin -- resolve K3QF
//!
//! # Check storage connection
//! cargo run --bin admin -- storage check
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST` / `REDIS_PORT` / `REDIS_PASSWORD` / `REDIS_DB` (required)
//!
//! The in-memory fallback is not available here: links created by this
//! process would vanish when it exits.

use shortener::application::services::{RedirectResolver, ShortenService};
use shortener::config::{Config, mask_connection_string};
use shortener::domain::clock::{Clock, SystemClock};
use shortener::domain::storage::Storage;
use shortener::error::AppError;
use shortener::infrastructure::storage::RedisStorage;

use anyhow::{Context, Result};
use chrono::SecondsFormat;
use clap::{Parser, Subcommand};
use colored::*;
use std::sync::Arc;

/// CLI tool for managing short links.
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
    /// Create a short link
    Shorten {
        /// Target URL (http or https)
        url: String,

        /// Origin used to build the short URL
        #[arg(short, long, default_value = "http://localhost:3000")]
        origin: String,
    },

    /// Show the target of a short code
    Resolve {
        /// Short code (4-6 characters)
        code: String,
    },

    /// Storage operations
    Storage {
        #[command(subcommand)]
        action: StorageAction,
    },
}

/// Storage operation subcommands.
#[derive(Subcommand)]
enum StorageAction {
    /// Check storage connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let redis_url = Config::redis_url_from_env()
        .context("REDIS_URL (or REDIS_HOST) must be set; the admin tool needs durable storage")?;

    let storage = RedisStorage::connect(&redis_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to Redis at {}",
                mask_connection_string(&redis_url)
            )
        })?;
    let storage: Arc<dyn Storage> = Arc::new(storage);
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);

    match cli.command {
        Commands::Shorten { url, origin } => shorten(storage, clock, &url, &origin).await?,
        Commands::Resolve { code } => resolve(storage, clock, &code).await?,
        Commands::Storage { action } => handle_storage_action(action, storage, &redis_url).await?,
    }

    Ok(())
}

/// Creates a short link and prints its details.
async fn shorten(
    storage: Arc<dyn Storage>,
    clock: Arc<dyn Clock>,
    url: &str,
    origin: &str,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let service = ShortenService::new(storage, clock);
    let link = service
        .shorten(url, origin)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Target:    {}", link.url.cyan());
    println!("  Short URL: {}", link.short_url.bright_green().bold());
    println!(
        "  Expires:   {}",
        link.expires_at
            .to_rfc3339_opts(SecondsFormat::Secs, true)
            .bright_black()
    );
    println!();

    Ok(())
}

/// Looks up a code and prints the target, or why it cannot be followed.
async fn resolve(storage: Arc<dyn Storage>, clock: Arc<dyn Clock>, code: &str) -> Result<()> {
    println!("{}", "🔍 Resolve Short Code".bright_blue().bold());
    println!();

    let resolver = RedirectResolver::new(storage, clock);

    match resolver.resolve_record(code).await {
        Ok(record) => {
            println!("  Code:    {}", code.bright_yellow().bold());
            println!("  Target:  {}", record.url.cyan());
            println!(
                "  Created: {}",
                record
                    .created_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
            println!(
                "  Expires: {}",
                record
                    .expires_at
                    .format("%Y-%m-%d %H:%M")
                    .to_string()
                    .bright_black()
            );
        }
        Err(AppError::NotFound { .. }) => {
            println!("  {} {}", code.bright_yellow(), "not found".yellow());
        }
        Err(AppError::CorruptRecord { reason, .. }) => {
            println!(
                "  {} {} ({})",
                code.bright_yellow(),
                "has a corrupt record".red().bold(),
                reason.bright_black()
            );
        }
        Err(e) => return Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }

    println!();
    Ok(())
}

/// Handles storage diagnostic commands.
async fn handle_storage_action(
    action: StorageAction,
    storage: Arc<dyn Storage>,
    redis_url: &str,
) -> Result<()> {
    match action {
        StorageAction::Check => {
            println!("{}", "🔍 Checking storage connection...".bright_blue());

            if !storage.health_check().await {
                anyhow::bail!("Storage health check failed");
            }

            println!(
                "  Backend: {} ({})",
                storage.backend().bright_white(),
                mask_connection_string(redis_url).bright_black()
            );
            println!("{}", "✅ Storage connection OK".green().bold());
        }
    }

    Ok(())
}
