//! Portal command handlers
//!
//! Creates portals from payload files and opens them through the API.

use anyhow::{Context, Result, bail};
use colored::*;
use portal_client::PortalClient;
use portal_core::domain::payload;
use portal_core::dto::portal::{PortalView, SavePortal};
use serde_json::Value;

use crate::config::Config;

/// Create a portal from a JSON payload file
pub async fn create_portal(
    config: &Config,
    payload_path: &str,
    id: Option<String>,
    passcode: Option<String>,
) -> Result<()> {
    let raw = std::fs::read_to_string(payload_path)
        .with_context(|| format!("Failed to read payload file: {}", payload_path))?;

    let data = build_payload(&raw, passcode)
        .with_context(|| format!("Invalid payload in {}", payload_path))?;
    let protected = data.get(payload::PASSCODE).is_some();

    let client = PortalClient::new(&config.api_url);
    let saved = client
        .save_portal(SavePortal {
            id,
            data: Some(data),
        })
        .await
        .context("Failed to save portal")?;

    println!("{}", "✓ Portal saved!".green().bold());
    println!("  ID:         {}", saved.id.bold());
    println!(
        "  Protected:  {}",
        if protected { "yes".yellow() } else { "no".normal() }
    );

    Ok(())
}

/// Open a portal, counting a view
pub async fn open_portal(config: &Config, id: &str, password: Option<&str>) -> Result<()> {
    let client = PortalClient::new(&config.api_url);

    let view = match client.load_portal(id, password).await {
        Ok(view) => view,
        Err(e) if e.is_not_found() => bail!("Portal '{}' not found", id),
        Err(e) if e.is_unauthorized() => bail!("Wrong password for portal '{}'", id),
        Err(e) => return Err(e).context("Failed to load portal"),
    };

    match view {
        PortalView::Protected { id, hint, .. } => {
            println!("{} Portal {} is protected.", "🔒".yellow(), id.bold());
            if let Some(hint) = hint {
                println!("  {}", hint.dimmed());
            }
            println!("  Re-run with {} to open it.", "--password".cyan());
        }
        PortalView::Unlocked { data } => {
            println!(
                "{} for {} from {}",
                payload::celebration_type(&data).bold(),
                payload::recipient_name(&data).cyan(),
                payload::sender_name(&data)
            );
            if let Some(views) = data
                .get("stats")
                .and_then(|s| s.get("views"))
                .and_then(Value::as_i64)
            {
                println!("  Views:  {}", views);
            }
            println!();
            println!("{}", serde_json::to_string_pretty(&data)?);
        }
    }

    Ok(())
}

/// Parse a payload file and attach the passcode, if any
///
/// The payload must be a JSON object. An explicit passcode overrides one
/// already present in the file.
fn build_payload(raw: &str, passcode: Option<String>) -> Result<Value> {
    let mut data: Value = serde_json::from_str(raw).context("Payload is not valid JSON")?;

    let Some(map) = data.as_object_mut() else {
        bail!("Payload must be a JSON object");
    };

    if let Some(passcode) = passcode.filter(|p| !p.is_empty()) {
        map.insert(payload::PASSCODE.to_string(), Value::String(passcode));
    }

    Ok(data)
}
