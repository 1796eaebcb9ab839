//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod db;
mod health;
mod music;
mod portal;
mod promo;
mod upload;

pub use db::DbCommands;
pub use music::MusicCommands;

use anyhow::Result;
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Database maintenance (talks to Postgres directly)
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
    /// Create or overwrite a portal from a JSON payload file
    Create {
        /// Path to a JSON file holding the portal payload
        #[arg(short, long)]
        payload: String,

        /// Portal ID (generated by the server when omitted)
        #[arg(long)]
        id: Option<String>,

        /// Protect the portal with a passcode
        #[arg(long)]
        passcode: Option<String>,
    },
    /// Open a portal as a visitor would (counts a view)
    Open {
        /// Portal ID
        id: String,

        /// Password for protected portals
        #[arg(short, long, env = "PORTAL_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Upload a file and print its public URL
    Upload {
        /// Path to the file
        path: String,

        /// Content type (guessed from the extension when omitted)
        #[arg(long)]
        content_type: Option<String>,
    },
    /// Search the music catalogue
    Music {
        #[command(subcommand)]
        command: MusicCommands,
    },
    /// Check a promo code
    Promo {
        /// The code to check
        code: String,
    },
    /// Check that the API is up
    Health,
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Db { command } => db::handle_db_command(command, config).await,
        Commands::Create {
            payload,
            id,
            passcode,
        } => portal::create_portal(config, &payload, id, passcode).await,
        Commands::Open { id, password } => {
            portal::open_portal(config, &id, password.as_deref()).await
        }
        Commands::Upload { path, content_type } => {
            upload::upload_file(config, &path, content_type.as_deref()).await
        }
        Commands::Music { command } => music::handle_music_command(command, config).await,
        Commands::Promo { code } => promo::check_promo(config, &code).await,
        Commands::Health => health::check_health(config).await,
    }
}
