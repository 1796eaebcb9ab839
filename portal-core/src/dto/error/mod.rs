//! Error body returned by every failing API endpoint

use serde::{Deserialize, Serialize};

/// JSON error object, e.g. `{"error":"upload_failed","details":"..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Short machine-readable error code
    pub error: String,

    /// Underlying failure, when one is worth surfacing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,

    /// Human-readable remediation hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
            message: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}
