//! API Error Handling
//!
//! Unified error types and conversion for API responses.
//! Every error renders as an [`ErrorBody`] JSON object.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use portal_core::dto::error::ErrorBody;

/// API error type
#[derive(Debug)]
pub enum ApiError {
    BadRequest(ErrorBody),
    Unauthorized(ErrorBody),
    NotFound(ErrorBody),
    PayloadTooLarge(ErrorBody),
    /// Database failure; the driver message is logged, not returned
    DatabaseError {
        code: &'static str,
        err: sqlx::Error,
    },
    InternalError(ErrorBody),
}

impl ApiError {
    pub fn bad_request(code: impl Into<String>) -> Self {
        ApiError::BadRequest(ErrorBody::new(code))
    }

    pub fn not_found(code: impl Into<String>) -> Self {
        ApiError::NotFound(ErrorBody::new(code))
    }

    pub fn unauthorized(code: impl Into<String>) -> Self {
        ApiError::Unauthorized(ErrorBody::new(code))
    }

    pub fn database(code: &'static str, err: sqlx::Error) -> Self {
        ApiError::DatabaseError { code, err }
    }

    /// 500 carrying the underlying failure as `details`
    pub fn internal(code: impl Into<String>, details: impl ToString) -> Self {
        ApiError::InternalError(ErrorBody::new(code).with_details(details.to_string()))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::BadRequest(body) => (StatusCode::BAD_REQUEST, body),
            ApiError::Unauthorized(body) => (StatusCode::UNAUTHORIZED, body),
            ApiError::NotFound(body) => (StatusCode::NOT_FOUND, body),
            ApiError::PayloadTooLarge(body) => (StatusCode::PAYLOAD_TOO_LARGE, body),
            ApiError::DatabaseError { code, err } => {
                tracing::error!("Database error ({}): {:?}", code, err);
                (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody::new(code))
            }
            ApiError::InternalError(body) => {
                tracing::error!(
                    "Internal error ({}): {}",
                    body.error,
                    body.details.as_deref().unwrap_or("-")
                );
                (StatusCode::INTERNAL_SERVER_ERROR, body)
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Malformed or mistyped JSON bodies become `invalid_data`
///
/// Bodies over the configured limit keep their 413 status.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        let details = rejection.body_text();

        if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
            ApiError::PayloadTooLarge(ErrorBody::new("payload_too_large").with_details(details))
        } else {
            ApiError::BadRequest(ErrorBody::new("invalid_data").with_details(details))
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
