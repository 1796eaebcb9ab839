use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;

use super::{Storage, StorageError, check_key, join_url};

/// Supabase Storage bucket, accessed through the storage REST API
pub struct SupabaseStorage {
    client: reqwest::Client,
    base_url: String,
    key: String,
    bucket: String,
}

impl SupabaseStorage {
    pub fn new(client: reqwest::Client, base_url: String, key: String, bucket: String) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            key,
            bucket,
        }
    }

    fn classify_failure(&self, key: &str, status: u16, body: String) -> StorageError {
        if body.contains("Bucket not found") {
            return StorageError::BucketMissing(self.bucket.clone());
        }
        if status == 409 || body.contains("Duplicate") || body.contains("already exists") {
            return StorageError::AlreadyExists(key.to_string());
        }
        StorageError::Rejected {
            status,
            message: body,
        }
    }
}

#[async_trait]
impl Storage for SupabaseStorage {
    async fn put(&self, key: &str, bytes: Vec<u8>, content_type: &str) -> Result<(), StorageError> {
        check_key(key)?;
        let url = join_url(
            &self.base_url,
            &["storage", "v1", "object", &self.bucket, key],
        )?;

        let response = self
            .client
            .post(url)
            .bearer_auth(&self.key)
            .header("apikey", &self.key)
            .header(CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::debug!("Stored {} in bucket {}", key, self.bucket);
            return Ok(());
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        Err(self.classify_failure(key, status.as_u16(), body))
    }

    fn public_url(&self, key: &str) -> Result<String, StorageError> {
        check_key(key)?;
        let url = join_url(
            &self.base_url,
            &["storage", "v1", "object", "public", &self.bucket, key],
        )?;
        Ok(url.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    fn storage_for(server: &MockServer) -> SupabaseStorage {
        SupabaseStorage::new(
            reqwest::Client::new(),
            server.base_url(),
            "service-key".to_string(),
            "portals".to_string(),
        )
    }

    #[tokio::test]
    async fn test_put_sends_object() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/storage/v1/object/portals/1-a.png")
                .header("authorization", "Bearer service-key")
                .header("apikey", "service-key")
                .header("content-type", "image/png")
                .header("x-upsert", "false");
            then.status(200).json_body(serde_json::json!({ "Key": "portals/1-a.png" }));
        });

        let storage = storage_for(&server);
        storage.put("1-a.png", b"png".to_vec(), "image/png").await.unwrap();

        mock.assert();
    }

    #[tokio::test]
    async fn test_missing_bucket_is_reported() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/storage/v1/object/portals/1-a.png");
            then.status(400).json_body(serde_json::json!({
                "statusCode": "404",
                "error": "Bucket not found",
                "message": "Bucket not found"
            }));
        });

        let storage = storage_for(&server);
        let err = storage
            .put("1-a.png", b"png".to_vec(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::BucketMissing(bucket) if bucket == "portals"));
    }

    #[tokio::test]
    async fn test_other_failures_keep_status() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/storage/v1/object/portals/1-a.png");
            then.status(500).body("boom");
        });

        let storage = storage_for(&server);
        let err = storage
            .put("1-a.png", b"png".to_vec(), "image/png")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Rejected { status: 500, .. }));
    }

    #[test]
    fn test_public_url() {
        let storage = SupabaseStorage::new(
            reqwest::Client::new(),
            "https://proj.supabase.co/".to_string(),
            "k".to_string(),
            "portals".to_string(),
        );
        assert_eq!(
            storage.public_url("1-a b.png").unwrap(),
            "https://proj.supabase.co/storage/v1/object/public/portals/1-a%20b.png"
        );
    }
}
