//! Upload DTOs

use serde::{Deserialize, Serialize};

/// Request to store a file
///
/// `data` is either a `data:<type>;base64,<data>` URL or bare base64.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadRequest {
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub data: Option<String>,
}

/// Public location of a stored upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub url: String,
}
