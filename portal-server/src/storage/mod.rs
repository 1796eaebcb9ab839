//! Object storage for uploads
//!
//! Uploads are written once under a unique key and served from a public URL.

mod local;
mod supabase;

pub use local::{LocalStorage, UPLOADS_ROUTE};
pub use supabase::SupabaseStorage;

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::config::StorageConfig;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("bucket '{0}' not found")]
    BucketMissing(String),

    #[error("object '{0}' already exists")]
    AlreadyExists(String),

    #[error("storage rejected upload (status {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("storage request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid object key: {0}")]
    InvalidKey(String),

    #[error("invalid storage URL: {0}")]
    InvalidUrl(String),
}

#[async_trait]
pub trait Storage: Send + Sync {
    /// Store bytes under `key`, failing if the key is taken
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError>;

    /// Public URL an object stored under `key` is reachable at
    fn public_url(&self, key: &str) -> Result<String, StorageError>;
}

/// Build the storage backend selected by configuration
pub async fn from_config(
    config: &StorageConfig,
    client: reqwest::Client,
) -> Result<Arc<dyn Storage>, StorageError> {
    let storage: Arc<dyn Storage> = match config {
        StorageConfig::Supabase { url, key, bucket } => Arc::new(SupabaseStorage::new(
            client,
            url.clone(),
            key.clone(),
            bucket.clone(),
        )),
        StorageConfig::Local {
            dir,
            public_base_url,
        } => Arc::new(LocalStorage::new(dir.clone(), public_base_url.clone()).await?),
    };
    Ok(storage)
}

/// Append path segments to a base URL, percent-encoding each one
fn join_url(base: &str, segments: &[&str]) -> Result<reqwest::Url, StorageError> {
    let mut url =
        reqwest::Url::parse(base).map_err(|e| StorageError::InvalidUrl(format!("{}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| StorageError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Reject keys that could escape the bucket or directory
fn check_key(key: &str) -> Result<(), StorageError> {
    if key.is_empty() || key.contains('/') || key.contains('\\') || key == "." || key == ".." {
        return Err(StorageError::InvalidKey(key.to_string()));
    }
    Ok(())
}
