//! ID resolver module
//!
//! Resolves portal id prefixes to full ids so users can type a short,
//! unambiguous prefix instead of the whole id.

use anyhow::{Context, Result, anyhow};
use sqlx::PgPool;

use portal_server::repository::portal_repository;

/// Resolve a portal id or prefix against the database
///
/// # Errors
/// Returns an error if:
/// - No portal matches the prefix
/// - Multiple portals match the prefix (ambiguous)
/// - The query fails
pub async fn resolve_portal_id(pool: &PgPool, id_or_prefix: &str) -> Result<String> {
    let ids = portal_repository::list_ids(pool)
        .await
        .context("Failed to fetch portal ids for ID resolution")?;

    resolve_from(&ids, id_or_prefix)
}

/// Match `id_or_prefix` against known ids
///
/// An exact match always wins, even when it is also a prefix of other ids.
/// Prefix matching is case-sensitive since portal ids are.
pub fn resolve_from(ids: &[String], id_or_prefix: &str) -> Result<String> {
    if id_or_prefix.is_empty() {
        return Err(anyhow!("Portal ID must not be empty"));
    }

    if let Some(exact) = ids.iter().find(|id| id.as_str() == id_or_prefix) {
        return Ok(exact.clone());
    }

    let matches: Vec<&String> = ids
        .iter()
        .filter(|id| id.starts_with(id_or_prefix))
        .collect();

    match matches.as_slice() {
        [] => Err(anyhow!(
            "No portal found with ID starting with '{}'",
            id_or_prefix
        )),
        [only] => Ok((*only).clone()),
        _ => {
            let ids: Vec<&str> = matches.iter().map(|id| id.as_str()).collect();
            Err(anyhow!(
                "Ambiguous prefix '{}' matches multiple portals: {}",
                id_or_prefix,
                ids.join(", ")
            ))
        }
    }
}
