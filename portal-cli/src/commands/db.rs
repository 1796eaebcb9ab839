//! Database command handlers
//!
//! Maintenance commands that talk to the portals table directly:
//! connectivity checks, migrations, listings, stats and data repair.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Subcommand;
use colored::*;
use portal_core::domain::payload;
use portal_core::domain::portal::Portal;
use portal_core::domain::stats::GlobalStats;
use serde_json::{Value, json};
use sqlx::PgPool;

use crate::config::Config;
use crate::id_resolver::resolve_portal_id;
use portal_server::config::redact_url;
use portal_server::db;
use portal_server::repository::portal_repository;

/// Database subcommands
#[derive(Subcommand)]
pub enum DbCommands {
    /// Check connectivity and print the server time
    Ping,
    /// Create or upgrade the portals table
    Migrate {
        /// Drop the table first (destroys all portals)
        #[arg(long)]
        reset: bool,
    },
    /// List the most recent portals
    List {
        /// Maximum number of portals to show
        #[arg(short, long, default_value = "10")]
        limit: i64,
    },
    /// Show global view and category statistics
    Stats,
    /// Print every portal's raw celebration type
    Categories,
    /// Pretty-print one portal's payload
    Inspect {
        /// Portal ID or unambiguous prefix
        id: String,
    },
    /// Repair celebration types saved as "[object Object]"
    FixTypes {
        /// Report what would change without writing
        #[arg(long)]
        dry_run: bool,
    },
    /// Insert a test portal and read it back
    TestInsert,
}

/// Handle database commands
///
/// Connects to Postgres and routes db subcommands to their handlers.
pub async fn handle_db_command(command: DbCommands, config: &Config) -> Result<()> {
    let database_url = config.database_url()?;
    let pool = db::create_pool(database_url)
        .await
        .with_context(|| format!("Failed to connect to {}", redact_url(database_url)))?;

    match command {
        DbCommands::Ping => ping(&pool, database_url).await,
        DbCommands::Migrate { reset } => migrate(&pool, reset).await,
        DbCommands::List { limit } => list_portals(&pool, limit).await,
        DbCommands::Stats => show_stats(&pool).await,
        DbCommands::Categories => show_categories(&pool).await,
        DbCommands::Inspect { id } => inspect_portal(&pool, &id).await,
        DbCommands::FixTypes { dry_run } => fix_types(&pool, dry_run).await,
        DbCommands::TestInsert => test_insert(&pool).await,
    }
}

async fn ping(pool: &PgPool, database_url: &str) -> Result<()> {
    let now = portal_repository::ping(pool)
        .await
        .context("Database did not answer")?;

    println!("{}", "✓ Connected!".green().bold());
    println!("  Database:     {}", redact_url(database_url).dimmed());
    println!(
        "  Server time:  {}",
        now.format("%Y-%m-%d %H:%M:%S UTC").to_string().dimmed()
    );
    Ok(())
}

async fn migrate(pool: &PgPool, reset: bool) -> Result<()> {
    if reset {
        println!("{}", "Dropping portals table...".yellow());
        db::reset_schema(pool)
            .await
            .context("Failed to reset schema")?;
    } else {
        db::run_migrations(pool)
            .await
            .context("Failed to run migrations")?;
    }

    println!("{}", "✓ Schema is up to date".green().bold());
    Ok(())
}

async fn list_portals(pool: &PgPool, limit: i64) -> Result<()> {
    let portals = portal_repository::list_recent(pool, limit.max(1))
        .await
        .context("Failed to fetch portals")?;

    if portals.is_empty() {
        println!("{}", "No portals found.".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("Showing {} most recent portal(s):", portals.len()).bold()
    );
    println!();
    for portal in &portals {
        print_portal_summary(portal);
    }

    Ok(())
}

fn print_portal_summary(portal: &Portal) {
    let lock = if portal.is_protected() { " 🔒" } else { "" };

    println!("  {} Portal {}{}", "▸".cyan(), portal.id.bold(), lock);
    println!("    Type:     {}", portal.celebration_type());
    println!("    Views:    {}", portal.views);
    println!(
        "    From/To:  {} -> {}",
        portal.sender_name(),
        portal.recipient_name()
    );
    println!("    Theme:    {}", portal.template());
    println!("    Created:  {}", format_created(portal).dimmed());
    println!();
}

fn format_created(portal: &Portal) -> String {
    portal
        .created_at
        .map(|at| at.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn show_stats(pool: &PgPool) -> Result<()> {
    let portals = portal_repository::list_all(pool)
        .await
        .context("Failed to fetch portals")?;
    let stats = GlobalStats::from_rows(portals.iter().map(|p| (p.views, &p.payload)));

    println!("{}", "Global statistics".bold());
    println!("  Total views:    {}", stats.total_views.to_string().green());
    println!("  Total portals:  {}", stats.total_portals.to_string().green());
    println!();

    if stats.categories.is_empty() {
        println!("{}", "No categories yet.".yellow());
        return Ok(());
    }

    println!("{}", "Portals by category:".bold());
    for (category, count) in stats.categories_by_count() {
        println!("  {:<20} {}", category, count);
    }

    Ok(())
}

async fn show_categories(pool: &PgPool) -> Result<()> {
    let portals = portal_repository::list_all(pool)
        .await
        .context("Failed to fetch portals")?;

    println!("{}", format!("{} portal(s):", portals.len()).bold());
    for portal in &portals {
        let raw = payload::describe_celebration_type(&portal.payload);
        let raw = if payload::has_corrupted_type(&portal.payload) {
            raw.red()
        } else {
            raw.normal()
        };
        println!("  {}  {}", portal.id.cyan(), raw);
    }

    Ok(())
}

async fn inspect_portal(pool: &PgPool, id_or_prefix: &str) -> Result<()> {
    let id = resolve_portal_id(pool, id_or_prefix).await?;
    let portal = portal_repository::find_by_id(pool, &id)
        .await
        .context("Failed to fetch portal")?
        .with_context(|| format!("Portal '{}' disappeared while inspecting", id))?;

    println!("{} {}", "Portal".bold(), portal.id.bold().cyan());
    println!("  Views:      {}", portal.views);
    println!(
        "  Protected:  {}",
        if portal.is_protected() { "yes" } else { "no" }
    );
    println!("  Created:    {}", format_created(&portal).dimmed());
    println!();
    println!("{}", serde_json::to_string_pretty(&portal.payload)?);

    Ok(())
}

/// Payloads that need their celebration type repaired, with the fixed value
fn plan_repairs(portals: &[Portal]) -> Vec<(&str, Value)> {
    portals
        .iter()
        .filter_map(|p| payload::repaired(&p.payload).map(|fixed| (p.id.as_str(), fixed)))
        .collect()
}

async fn fix_types(pool: &PgPool, dry_run: bool) -> Result<()> {
    let portals = portal_repository::list_all(pool)
        .await
        .context("Failed to fetch portals")?;
    let repairs = plan_repairs(&portals);

    if repairs.is_empty() {
        println!("{}", "✓ No corrupted celebration types found.".green());
        return Ok(());
    }

    println!(
        "{}",
        format!(
            "Found {} portal(s) with celebrationType \"{}\"",
            repairs.len(),
            payload::CORRUPTED_TYPE
        )
        .bold()
    );

    let mut fixed = 0usize;
    let mut failed = 0usize;

    for (id, repaired) in &repairs {
        if dry_run {
            println!("  {} {} (dry run)", "~".yellow(), id);
            continue;
        }

        match portal_repository::update_payload(pool, id, repaired).await {
            Ok(true) => {
                fixed += 1;
                println!("  {} {}", "✓".green(), id);
            }
            Ok(false) => {
                failed += 1;
                println!("  {} {} (row no longer exists)", "✗".red(), id);
            }
            Err(e) => {
                failed += 1;
                tracing::warn!("Failed to repair portal {}: {}", id, e);
                println!("  {} {}: {}", "✗".red(), id, e);
            }
        }
    }

    println!();
    if dry_run {
        println!(
            "{}",
            format!("Dry run: {} portal(s) would be repaired.", repairs.len()).yellow()
        );
    } else {
        println!(
            "{}",
            format!("Repaired {} portal(s), {} failed.", fixed, failed).bold()
        );
    }

    Ok(())
}

async fn test_insert(pool: &PgPool) -> Result<()> {
    let id = format!("test-{}", Utc::now().timestamp_millis());
    let data = json!({ "test": true });

    portal_repository::insert_raw(pool, &id, &data)
        .await
        .context("Test insert failed")?;
    println!("{} Inserted {}", "✓".green().bold(), id.bold());

    let stored = portal_repository::find_by_id(pool, &id)
        .await
        .context("Failed to read back test portal")?
        .with_context(|| format!("Test portal '{}' was not found after insert", id))?;

    println!("  Payload:  {}", stored.payload);
    println!("  Views:    {}", stored.views);
    Ok(())
}
