//! Promo code command

use anyhow::{Context, Result, bail};
use colored::*;
use portal_client::PortalClient;

use crate::config::Config;

/// Check a promo code; an unknown code exits non-zero
pub async fn check_promo(config: &Config, code: &str) -> Result<()> {
    let client = PortalClient::new(&config.api_url);

    let valid = client
        .validate_promo(code)
        .await
        .context("Failed to validate promo code")?;

    if !valid {
        bail!("Promo code '{}' is not valid", code);
    }

    println!("{} Promo code {} is valid", "✓".green().bold(), code.bold());
    Ok(())
}
