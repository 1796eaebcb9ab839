use sqlx::{PgPool, postgres::PgPoolOptions};
use std::time::Duration;

pub async fn create_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
}

/// Pool that only connects on first use
///
/// Used by tooling and tests that may never touch the database.
pub fn create_lazy_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy(database_url)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::Error> {
    create_portals_table(pool).await?;

    // Tables created by the first schema revision have no view counter
    sqlx::query("ALTER TABLE portals ADD COLUMN IF NOT EXISTS views BIGINT NOT NULL DEFAULT 0")
        .execute(pool)
        .await?;

    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_portals_created_at ON portals(created_at DESC)",
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed successfully");
    Ok(())
}

/// Drop the portals table and recreate it empty
///
/// Destroys every stored portal.
pub async fn reset_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS portals")
        .execute(pool)
        .await?;

    tracing::warn!("Dropped portals table");

    run_migrations(pool).await
}

async fn create_portals_table(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS portals (
            id TEXT PRIMARY KEY,
            payload JSONB NOT NULL,
            pass_salt TEXT,
            pass_hash TEXT,
            pass_iterations INTEGER,
            pass_digest TEXT,
            views BIGINT NOT NULL DEFAULT 0,
            created_at TIMESTAMPTZ DEFAULT now()
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// True when the error means the portals table has not been created yet
pub fn is_missing_table(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("42P01"),
        _ => false,
    }
}
