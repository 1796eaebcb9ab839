//! Upload API Handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use portal_core::dto::error::ErrorBody;
use portal_core::dto::upload::{UploadRequest, UploadResponse};

use crate::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::upload_service::{self, UploadServiceError};
use crate::storage::StorageError;

/// POST /api/upload
/// Store a base64 or data-URL encoded file and return its public URL
pub async fn upload(
    State(state): State<AppState>,
    body: Result<Json<UploadRequest>, JsonRejection>,
) -> ApiResult<Json<UploadResponse>> {
    let Json(req) = body?;

    let response = upload_service::store_upload(state.storage.as_ref(), req)
        .await
        .map_err(|e| match e {
            UploadServiceError::MissingData => ApiError::bad_request("missing_data"),
            UploadServiceError::InvalidData(err) => {
                ApiError::BadRequest(ErrorBody::new("invalid_data").with_details(err.to_string()))
            }
            UploadServiceError::Storage(StorageError::BucketMissing(bucket)) => {
                tracing::error!("Upload bucket {} is missing", bucket);
                ApiError::InternalError(ErrorBody::new("bucket_missing").with_message(format!(
                    "The \"{}\" bucket was not found in storage. Create it and make it public.",
                    bucket
                )))
            }
            UploadServiceError::Storage(err) => ApiError::internal("upload_failed", err),
        })?;

    Ok(Json(response))
}
