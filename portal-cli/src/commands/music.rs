//! Music command handlers
//!
//! Searches and looks up songs through the portal's iTunes proxy.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use portal_client::PortalClient;
use portal_core::dto::music::{Track, TrackResults};

use crate::config::Config;

/// Music subcommands
#[derive(Subcommand)]
pub enum MusicCommands {
    /// Search songs by free text
    Search {
        /// Search term (artist, song, album)
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Look up a track by iTunes ID
    Lookup {
        /// iTunes track or collection ID
        id: String,
    },
}

/// Handle music commands
pub async fn handle_music_command(command: MusicCommands, config: &Config) -> Result<()> {
    let client = PortalClient::new(&config.api_url);

    match command {
        MusicCommands::Search { query } => {
            let query = query.join(" ");
            let results = client
                .search_music(&query)
                .await
                .context("Music search failed")?;
            print_results(&results, &format!("for '{}'", query));
        }
        MusicCommands::Lookup { id } => {
            let results = client
                .lookup_music(&id)
                .await
                .context("Music lookup failed")?;
            print_results(&results, &format!("for ID {}", id));
        }
    }

    Ok(())
}

fn print_results(results: &TrackResults, what: &str) {
    let tracks: Vec<&Track> = results.tracks().collect();

    if tracks.is_empty() {
        println!("{}", format!("No tracks found {}.", what).yellow());
        return;
    }

    println!(
        "{}",
        format!("Found {} track(s) {}:", tracks.len(), what).bold()
    );
    println!();
    for track in tracks {
        print_track(track);
    }
}

fn print_track(track: &Track) {
    let id = track
        .track_id
        .map(|id| id.to_string())
        .unwrap_or_else(|| "-".to_string());

    println!(
        "  {} {} {} {}",
        "▸".cyan(),
        track.track_name.as_deref().unwrap_or("Untitled").bold(),
        "by".dimmed(),
        track.artist_name.as_deref().unwrap_or("Unknown artist")
    );
    println!("    ID:       {}", id);
    if let Some(album) = &track.collection_name {
        println!("    Album:    {}", album);
    }
    match &track.preview_url {
        Some(url) => println!("    Preview:  {}", url.dimmed()),
        None => println!("    Preview:  {}", "none".dimmed()),
    }
    println!();
}
