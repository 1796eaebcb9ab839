//! Portal Repository
//!
//! Handles all database operations related to portals.

use chrono::{DateTime, Utc};
use portal_core::domain::portal::{PassMeta, Portal};
use serde_json::Value;
use sqlx::PgPool;

// Older tables may store views as INTEGER or allow NULLs
const PORTAL_COLUMNS: &str = "id, payload, pass_salt, pass_hash, pass_iterations, pass_digest, \
     COALESCE(views, 0)::BIGINT AS views, created_at";

/// Insert a portal or overwrite the payload and passcode of an existing one
///
/// View count and creation time of an existing row are kept.
pub async fn upsert(
    pool: &PgPool,
    id: &str,
    payload: &Value,
    pass: Option<&PassMeta>,
) -> Result<(), sqlx::Error> {
    let iterations = iterations_column(pass)?;

    sqlx::query(
        r#"
        INSERT INTO portals (id, payload, pass_salt, pass_hash, pass_iterations, pass_digest)
        VALUES ($1, $2, $3, $4, $5, $6)
        ON CONFLICT (id) DO UPDATE SET
            payload = EXCLUDED.payload,
            pass_salt = EXCLUDED.pass_salt,
            pass_hash = EXCLUDED.pass_hash,
            pass_iterations = EXCLUDED.pass_iterations,
            pass_digest = EXCLUDED.pass_digest
        "#,
    )
    .bind(id)
    .bind(payload)
    .bind(pass.and_then(|p| p.salt.as_deref()))
    .bind(pass.map(|p| p.hash.as_str()))
    .bind(iterations)
    .bind(pass.and_then(|p| p.digest.as_deref()))
    .execute(pool)
    .await?;

    Ok(())
}

/// Insert a bare portal row with no passcode
pub async fn insert_raw(pool: &PgPool, id: &str, payload: &Value) -> Result<(), sqlx::Error> {
    sqlx::query("INSERT INTO portals (id, payload) VALUES ($1, $2)")
        .bind(id)
        .bind(payload)
        .execute(pool)
        .await?;

    Ok(())
}

/// Find a portal by ID
pub async fn find_by_id(pool: &PgPool, id: &str) -> Result<Option<Portal>, sqlx::Error> {
    let row = sqlx::query_as::<_, PortalRow>(&format!(
        "SELECT {} FROM portals WHERE id = $1",
        PORTAL_COLUMNS
    ))
    .bind(id)
    .fetch_optional(pool)
    .await?;

    Ok(row.map(|r| r.into()))
}

/// Atomically bump the view counter, returning the new count
///
/// Returns `None` when the portal no longer exists.
pub async fn increment_views(pool: &PgPool, id: &str) -> Result<Option<i64>, sqlx::Error> {
    sqlx::query_scalar::<_, i64>(
        "UPDATE portals SET views = COALESCE(views, 0) + 1 WHERE id = $1 RETURNING views::BIGINT",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Most recently created portals, newest first
pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Portal>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PortalRow>(&format!(
        "SELECT {} FROM portals ORDER BY created_at DESC NULLS LAST LIMIT $1",
        PORTAL_COLUMNS
    ))
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// List all portals
pub async fn list_all(pool: &PgPool) -> Result<Vec<Portal>, sqlx::Error> {
    let rows = sqlx::query_as::<_, PortalRow>(&format!(
        "SELECT {} FROM portals ORDER BY created_at DESC NULLS LAST",
        PORTAL_COLUMNS
    ))
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().map(|r| r.into()).collect())
}

/// All portal IDs
pub async fn list_ids(pool: &PgPool) -> Result<Vec<String>, sqlx::Error> {
    sqlx::query_scalar::<_, String>("SELECT id FROM portals ORDER BY id")
        .fetch_all(pool)
        .await
}

/// Replace the payload of a portal
pub async fn update_payload(pool: &PgPool, id: &str, payload: &Value) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("UPDATE portals SET payload = $1 WHERE id = $2")
        .bind(payload)
        .bind(id)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Current database server time, used as a connectivity check
pub async fn ping(pool: &PgPool) -> Result<DateTime<Utc>, sqlx::Error> {
    sqlx::query_scalar::<_, DateTime<Utc>>("SELECT NOW()")
        .fetch_one(pool)
        .await
}

/// `pass_iterations` is an INTEGER column; counts beyond it are refused
fn iterations_column(pass: Option<&PassMeta>) -> Result<Option<i32>, sqlx::Error> {
    pass.and_then(|p| p.iterations)
        .map(i32::try_from)
        .transpose()
        .map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

// =============================================================================
// Database Row Types
// =============================================================================

#[derive(sqlx::FromRow)]
struct PortalRow {
    id: String,
    payload: Value,
    pass_salt: Option<String>,
    pass_hash: Option<String>,
    pass_iterations: Option<i32>,
    pass_digest: Option<String>,
    views: i64,
    created_at: Option<DateTime<Utc>>,
}

impl From<PortalRow> for Portal {
    fn from(row: PortalRow) -> Self {
        let pass = row.pass_hash.filter(|h| !h.is_empty()).map(|hash| PassMeta {
            salt: row.pass_salt,
            hash,
            iterations: row
                .pass_iterations
                .and_then(|i| u32::try_from(i).ok()),
            digest: row.pass_digest,
        });

        Portal {
            id: row.id,
            payload: row.payload,
            pass,
            views: row.views,
            created_at: row.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meta(iterations: Option<u32>) -> PassMeta {
        PassMeta {
            salt: Some("ab12".to_string()),
            hash: "ff".to_string(),
            iterations,
            digest: Some("sha256".to_string()),
        }
    }

    #[test]
    fn test_iterations_column() {
        assert_eq!(iterations_column(None).unwrap(), None);
        assert_eq!(iterations_column(Some(&meta(None))).unwrap(), None);
        assert_eq!(
            iterations_column(Some(&meta(Some(200_000)))).unwrap(),
            Some(200_000)
        );
    }

    #[test]
    fn test_iterations_column_refuses_overflow() {
        let result = iterations_column(Some(&meta(Some(u32::MAX))));
        assert!(matches!(result, Err(sqlx::Error::Encode(_))));
    }
}
