//! Portal CLI
//!
//! Command-line interface for the celebration portal: database maintenance
//! and calls against a running portal API.

mod commands;
mod config;
mod id_resolver;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "portal")]
#[command(about = "Celebration portal CLI", long_about = None)]
struct Cli {
    /// Portal API URL
    #[arg(long, env = "PORTAL_API_URL", default_value = "http://localhost:8787")]
    api_url: String,

    /// Postgres connection string (falls back to NEON_DATABASE_URL)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_cli=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config::new(
        cli.api_url,
        cli.database_url,
        std::env::var("NEON_DATABASE_URL").ok(),
    );

    handle_command(cli.command, &config).await
}
