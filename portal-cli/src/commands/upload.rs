//! Upload command

use anyhow::{Context, Result};
use colored::*;
use portal_client::PortalClient;
use std::path::Path;

use crate::config::Config;

/// Upload a local file through the API
pub async fn upload_file(config: &Config, path: &str, content_type: Option<&str>) -> Result<()> {
    let path = Path::new(path);
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file: {}", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or(portal_core::upload::DEFAULT_FILENAME);
    let content_type = content_type.unwrap_or_else(|| guess_content_type(path));

    let client = PortalClient::new(&config.api_url);
    let uploaded = client
        .upload_bytes(filename, content_type, &bytes)
        .await
        .context("Upload failed")?;

    println!(
        "{} Uploaded {} ({} bytes, {})",
        "✓".green().bold(),
        filename.bold(),
        bytes.len(),
        content_type.dimmed()
    );
    println!("  {}", uploaded.url.cyan());

    Ok(())
}

/// Content type for the media a portal typically carries
fn guess_content_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("mp3") => "audio/mpeg",
        Some("m4a") => "audio/mp4",
        Some("wav") => "audio/wav",
        Some("mp4") => "video/mp4",
        Some("webm") => "video/webm",
        Some("json") => "application/json",
        Some("txt") => "text/plain",
        _ => portal_core::upload::DEFAULT_CONTENT_TYPE,
    }
}
