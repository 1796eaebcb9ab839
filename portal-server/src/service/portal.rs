//! Portal Service
//!
//! Business logic for saving and opening portals.

use portal_core::domain::payload::PASSCODE;
use portal_core::domain::portal::{PassMeta, Portal};
use portal_core::dto::portal::{PortalView, SavePortal, SavedPortal};
use portal_core::id::generate_portal_id;
use portal_core::passcode::{self, PasscodeError};
use serde_json::{Map, Value, json};
use sqlx::PgPool;
use thiserror::Error;

use crate::repository::portal_repository;

pub const MAX_ID_LEN: usize = 128;

/// Service error type
#[derive(Debug, Error)]
pub enum PortalError {
    #[error("{0}")]
    ValidationError(String),

    #[error("Portal {0} not found")]
    NotFound(String),

    #[error("invalid password")]
    InvalidPassword,

    #[error("passcode verification failed: {0}")]
    AuthError(#[from] PasscodeError),

    #[error("passcode hashing task failed: {0}")]
    HashingFailed(String),

    #[error(transparent)]
    DatabaseError(#[from] sqlx::Error),
}

pub type Result<T> = std::result::Result<T, PortalError>;

/// Create or overwrite a portal
pub async fn save_portal(pool: &PgPool, req: SavePortal) -> Result<SavedPortal> {
    let id = match req.id.as_deref().map(str::trim) {
        Some(id) if !id.is_empty() => {
            validate_id(id)?;
            id.to_string()
        }
        _ => generate_portal_id(),
    };

    let (payload, passcode) = prepare_payload(req.data)?;

    let pass = match passcode {
        Some(code) => Some(hash_in_background(code).await?),
        None => None,
    };

    portal_repository::upsert(pool, &id, &payload, pass.as_ref()).await?;

    tracing::info!(
        "Portal saved: {} (protected: {})",
        id,
        pass.is_some()
    );

    Ok(SavedPortal { id })
}

/// Open a portal, checking its password and counting the view
///
/// A protected portal requested without a password yields
/// [`PortalView::Protected`] and is not counted as viewed.
pub async fn load_portal(pool: &PgPool, id: &str, password: Option<&str>) -> Result<PortalView> {
    let portal = portal_repository::find_by_id(pool, id)
        .await?
        .ok_or_else(|| PortalError::NotFound(id.to_string()))?;

    let password = password.filter(|p| !p.is_empty());
    let access = match (&portal.pass, password) {
        (Some(meta), Some(password)) => {
            check_access_in_background(meta.clone(), password.to_string()).await?
        }
        (pass, password) => check_access(pass.as_ref(), password)?,
    };

    match access {
        Access::Locked => {
            tracing::debug!("Portal {} is protected, password required", id);
            Ok(PortalView::locked(id))
        }
        Access::Granted => {
            let counted = portal_repository::increment_views(pool, id).await;
            Ok(open_view(portal, counted))
        }
    }
}

/// Outcome of presenting a password to a portal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// Protected and no password given; only the lock is revealed
    Locked,
    Granted,
}

/// Decide whether `password` opens a portal with pass metadata `pass`
///
/// A wrong password is [`PortalError::InvalidPassword`]; metadata that
/// cannot be verified (no salt, unknown digest) is [`PortalError::AuthError`].
pub fn check_access(pass: Option<&PassMeta>, password: Option<&str>) -> Result<Access> {
    let Some(meta) = pass else {
        return Ok(Access::Granted);
    };

    let Some(password) = password.filter(|p| !p.is_empty()) else {
        return Ok(Access::Locked);
    };

    if passcode::verify_passcode(password, meta)? {
        Ok(Access::Granted)
    } else {
        tracing::info!("Rejected portal password");
        Err(PortalError::InvalidPassword)
    }
}

/// Unlocked view of a portal after its view was counted
///
/// When counting failed or found no row, the stored count plus this view
/// is reported.
fn open_view(portal: Portal, counted: std::result::Result<Option<i64>, sqlx::Error>) -> PortalView {
    let views = match counted {
        Ok(Some(views)) => views,
        Ok(None) => portal.views + 1,
        Err(err) => {
            tracing::warn!("Failed to count view for portal {}: {:?}", portal.id, err);
            portal.views + 1
        }
    };

    let protected = portal.is_protected();
    PortalView::Unlocked {
        data: unlocked_payload(portal.payload, protected, views),
    }
}

// =============================================================================
// Payload Handling
// =============================================================================

/// Split the client payload into the stored object and an optional passcode
///
/// A missing payload becomes an empty object. The `passcode` field never
/// reaches storage; only non-empty strings are treated as passcodes.
fn prepare_payload(data: Option<Value>) -> Result<(Value, Option<String>)> {
    let mut map = match data {
        None | Some(Value::Null) => Map::new(),
        Some(Value::Object(map)) => map,
        Some(_) => {
            return Err(PortalError::ValidationError(
                "Portal data must be a JSON object".to_string(),
            ));
        }
    };

    let passcode = match map.remove(PASSCODE) {
        Some(Value::String(code)) if !code.is_empty() => Some(code),
        _ => None,
    };

    Ok((Value::Object(map), passcode))
}

/// Payload as returned to a viewer, with protection flag and view stats
fn unlocked_payload(payload: Value, protected: bool, views: i64) -> Value {
    let mut map = match payload {
        Value::Object(map) => map,
        _ => Map::new(),
    };

    map.insert("passcodeProtected".to_string(), Value::Bool(protected));
    map.insert("stats".to_string(), json!({ "views": views }));
    Value::Object(map)
}

fn validate_id(id: &str) -> Result<()> {
    if id.len() > MAX_ID_LEN {
        return Err(PortalError::ValidationError(format!(
            "Portal id is too long (max {} characters)",
            MAX_ID_LEN
        )));
    }

    if id.chars().any(|c| c.is_control() || c.is_whitespace()) {
        return Err(PortalError::ValidationError(
            "Portal id cannot contain whitespace or control characters".to_string(),
        ));
    }

    Ok(())
}

// PBKDF2 at 200k rounds is too slow for the async executor

async fn hash_in_background(code: String) -> Result<PassMeta> {
    tokio::task::spawn_blocking(move || passcode::hash_passcode(&code, None))
        .await
        .map_err(|e| PortalError::HashingFailed(e.to_string()))
}

async fn check_access_in_background(meta: PassMeta, password: String) -> Result<Access> {
    tokio::task::spawn_blocking(move || check_access(Some(&meta), Some(&password)))
        .await
        .map_err(|e| PortalError::HashingFailed(e.to_string()))?
}
