use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use portal_server::config::{ServerConfig, StorageConfig};
use portal_server::service::music::MusicService;
use portal_server::service::promo::PromoCodes;
use portal_server::{AppState, api, db, storage};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "portal_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Portal Server...");

    let config = ServerConfig::from_env().context("Failed to load configuration")?;
    config.validate().context("Invalid configuration")?;

    tracing::info!("Connecting to database {}", config.redacted_database_url());

    // Create database connection pool
    let pool = db::create_pool(&config.database_url)
        .await
        .context("Failed to create database pool")?;

    tracing::info!("Database connection pool created");

    // Run migrations
    db::run_migrations(&pool)
        .await
        .context("Failed to run database migrations")?;

    // Shared outbound HTTP client (iTunes, Supabase Storage)
    let http = reqwest::Client::builder()
        .timeout(config.http_timeout)
        .build()
        .context("Failed to build HTTP client")?;

    let storage = storage::from_config(&config.storage, http.clone())
        .await
        .context("Failed to initialize upload storage")?;

    let uploads_dir = match &config.storage {
        StorageConfig::Local { dir, .. } => {
            tracing::info!("Storing uploads locally in {}", dir.display());
            Some(dir.clone())
        }
        StorageConfig::Supabase { bucket, .. } => {
            tracing::info!("Storing uploads in Supabase bucket '{}'", bucket);
            None
        }
    };

    let promo_codes = PromoCodes::new(config.promo_codes.clone());
    tracing::info!("Loaded {} promo code(s)", promo_codes.len());

    let state = AppState {
        pool,
        storage,
        music: MusicService::new(http, config.itunes_base_url.clone()),
        promo_codes: Arc::new(promo_codes),
        max_body_bytes: config.max_upload_bytes,
        uploads_dir,
    };

    // Build router with all API endpoints
    let app = api::create_router(state);

    tracing::info!("Listening on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Portal Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", err);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
