use anyhow::{Context, Result};
use colored::*;
use portal_client::PortalClient;

use crate::config::Config;

pub async fn check_health(config: &Config) -> Result<()> {
    let client = PortalClient::new(&config.api_url);

    client
        .health()
        .await
        .with_context(|| format!("Portal API at {} is not healthy", client.base_url()))?;

    println!("{} {}", "✓".green().bold(), format!("{} is up", client.base_url()).bold());
    Ok(())
}
