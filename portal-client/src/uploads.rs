//! Upload endpoint

use base64::Engine;
use base64::engine::general_purpose::STANDARD;

use crate::PortalClient;
use crate::error::{ClientError, Result};
use portal_core::dto::upload::{UploadRequest, UploadResponse};

impl PortalClient {
    /// Upload a base64 payload (raw or data URL)
    pub async fn upload(&self, req: UploadRequest) -> Result<UploadResponse> {
        if req.data.as_deref().is_none_or(str::is_empty) {
            return Err(ClientError::InvalidRequest(
                "upload data must not be empty".to_string(),
            ));
        }

        let url = format!("{}/api/upload", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Upload raw bytes, encoding them as a data URL
    ///
    /// # Returns
    /// The public URL of the stored file
    pub async fn upload_bytes(
        &self,
        filename: &str,
        content_type: &str,
        bytes: &[u8],
    ) -> Result<UploadResponse> {
        tracing::debug!("Uploading {} ({} bytes)", filename, bytes.len());

        self.upload(UploadRequest {
            filename: Some(filename.to_string()),
            data: Some(data_url(content_type, bytes)),
        })
        .await
    }
}

/// Encode bytes as `data:<type>;base64,<payload>`
pub fn data_url(content_type: &str, bytes: &[u8]) -> String {
    format!("data:{};base64,{}", content_type, STANDARD.encode(bytes))
}
