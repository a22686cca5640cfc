//! CLI administration tool for url-alias.
//!
//! Inspects stored urls and checks the database without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Show one record
//! cargo run --bin admin -- url show aB3dE9
//!
//! # Record and visit totals
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string

use url_alias::domain::repositories::UrlRepository;
use url_alias::infrastructure::persistence::PgUrlRepository;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for inspecting url-alias.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect url records
    Url {
        #[command(subcommand)]
        action: UrlAction,
    },

    /// Show record and visit totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UrlAction {
    /// Show the record behind an alias
    Show {
        /// Alias to look up (case-sensitive)
        alias: String,
    },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let repo = PgUrlRepository::new(Arc::new(pool.clone()));

    match cli.command {
        Commands::Url { action } => handle_url_action(action, &repo).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &repo).await?,
    }

    pool.close().await;
    Ok(())
}

async fn handle_url_action(action: UrlAction, repo: &PgUrlRepository) -> Result<()> {
    match action {
        UrlAction::Show { alias } => {
            let Some(record) = repo.get_by_alias(&alias).await? else {
                println!("{} {}", "No url with alias".red(), alias.bold());
                return Ok(());
            };

            println!("{}", "Url record".bright_blue().bold());
            println!();
            println!("  ID:      {}", record.id.to_string().bright_white());
            println!("  Alias:   {}", record.alias.bright_green().bold());
            println!("  Target:  {}", record.target_url);
            println!(
                "  Visits:  {}",
                record.visit_count.to_string().bright_green().bold()
            );
            println!(
                "  Created: {}",
                record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
            println!();
        }
    }

    Ok(())
}

/// Displays the number of records and the sum of their visit counters.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "Statistics".bright_blue().bold());
    println!();

    let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await?;

    let visits_total: i64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(visit_count), 0)::BIGINT FROM urls")
            .fetch_one(pool)
            .await?;

    println!(
        "  Urls:    {}",
        urls_count.to_string().bright_green().bold()
    );
    println!(
        "  Visits:  {}",
        visits_total.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, repo: &PgUrlRepository) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "Checking database connection...".bright_blue());

            repo.health_check().await?;

            println!("{}", "Database connection OK".green().bold());
        }
    }

    Ok(())
}
