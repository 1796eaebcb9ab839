//! Error types for the portal client

use portal_core::dto::error::ErrorBody;
use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when using the portal client
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error code and details from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Create an API error from a raw response body
    ///
    /// JSON error objects are flattened to `code: details`; anything else is
    /// kept verbatim.
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorBody>(body) {
            Ok(err) => match err.details.or(err.message) {
                Some(extra) => format!("{}: {}", err.error, extra),
                None => err.error,
            },
            Err(_) if body.is_empty() => "Unknown error".to_string(),
            Err(_) => body.to_string(),
        };
        Self::api_error(status, message)
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a rejected portal password
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::ApiError { status: 401, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_body() {
        let err = ClientError::from_body(500, r#"{"error":"upload_failed","details":"disk full"}"#);
        assert_eq!(
            err.to_string(),
            "API error (status 500): upload_failed: disk full"
        );
        assert!(err.is_server_error());
    }

    #[test]
    fn test_from_plain_body() {
        let err = ClientError::from_body(404, "");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "API error (status 404): Unknown error");
    }
}
