//! Upload Service
//!
//! Decodes client uploads and writes them to object storage.

use portal_core::dto::upload::{UploadRequest, UploadResponse};
use portal_core::upload::{self, UploadError};
use thiserror::Error;

use crate::storage::{Storage, StorageError};

#[derive(Debug, Error)]
pub enum UploadServiceError {
    #[error("no upload data provided")]
    MissingData,

    #[error(transparent)]
    InvalidData(#[from] UploadError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Store an upload and return its public URL
pub async fn store_upload(
    storage: &dyn Storage,
    req: UploadRequest,
) -> Result<UploadResponse, UploadServiceError> {
    let data = req
        .data
        .filter(|d| !d.is_empty())
        .ok_or(UploadServiceError::MissingData)?;

    let decoded = upload::decode_upload(&data)?;
    let key = upload::storage_key(
        req.filename.as_deref(),
        chrono::Utc::now().timestamp_millis(),
    );

    let size = decoded.bytes.len();
    storage
        .put(&key, decoded.bytes, &decoded.content_type)
        .await?;
    let url = storage.public_url(&key)?;

    tracing::info!("Upload stored: {} ({}, {} bytes)", key, decoded.content_type, size);

    Ok(UploadResponse { url })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;

    #[tokio::test]
    async fn test_store_upload_writes_decoded_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path(), "http://localhost:8787")
            .await
            .unwrap();

        let response = store_upload(
            &storage,
            UploadRequest {
                filename: Some("note.txt".to_string()),
                data: Some("data:text/plain;base64,aGVsbG8=".to_string()),
            },
        )
        .await
        .unwrap();

        assert!(response.url.starts_with("http://localhost:8787/uploads/"));
        assert!(response.url.ends_with("-note.txt"));

        let key = response.url.rsplit('/').next().unwrap();
        assert_eq!(std::fs::read(tmp.path().join(key)).unwrap(), b"hello");
    }

    #[tokio::test]
    async fn test_store_upload_requires_data() {
        let tmp = tempfile::tempdir().unwrap();
        let storage = LocalStorage::new(tmp.path(), "http://localhost:8787")
            .await
            .unwrap();

        let err = store_upload(&storage, UploadRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, UploadServiceError::MissingData));

        let err = store_upload(
            &storage,
            UploadRequest {
                filename: None,
                data: Some("***".to_string()),
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, UploadServiceError::InvalidData(_)));
    }
}
