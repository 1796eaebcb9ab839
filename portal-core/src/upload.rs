//! Upload payload decoding
//!
//! Uploads arrive as JSON strings holding either a `data:` URL or bare
//! base64. This module turns them into bytes plus a content type and picks
//! the object key they are stored under.

use base64::Engine;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use thiserror::Error;

pub const DEFAULT_CONTENT_TYPE: &str = "application/octet-stream";
pub const DEFAULT_FILENAME: &str = "upload.bin";

const DATA_URL_PREFIX: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// Standard alphabet, padding optional
const LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent),
);

#[derive(Debug, Error)]
pub enum UploadError {
    #[error("upload data is empty")]
    Empty,

    #[error("invalid base64 data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Decoded upload body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedUpload {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Decode a `data:<type>;base64,<data>` URL or a bare base64 string
pub fn decode_upload(data: &str) -> Result<DecodedUpload, UploadError> {
    let (content_type, encoded) = match split_data_url(data) {
        Some((content_type, encoded)) => (content_type.to_string(), encoded),
        None => (DEFAULT_CONTENT_TYPE.to_string(), data),
    };

    let cleaned: String = encoded.chars().filter(|c| !c.is_whitespace()).collect();
    if cleaned.is_empty() {
        return Err(UploadError::Empty);
    }

    let bytes = LENIENT.decode(cleaned.as_bytes())?;
    Ok(DecodedUpload {
        content_type,
        bytes,
    })
}

/// Object key for an upload: `{millis}-{filename}`
///
/// Only the last path component of the client filename is kept.
pub fn storage_key(filename: Option<&str>, now_millis: i64) -> String {
    let name = filename
        .and_then(|f| f.rsplit(['/', '\\']).next())
        .map(str::trim)
        .filter(|f| !f.is_empty() && *f != "." && *f != "..")
        .unwrap_or(DEFAULT_FILENAME);

    format!("{}-{}", now_millis, name)
}

fn split_data_url(data: &str) -> Option<(&str, &str)> {
    let rest = data.strip_prefix(DATA_URL_PREFIX)?;
    let marker = rest.rfind(BASE64_MARKER)?;
    let content_type = &rest[..marker];
    let encoded = &rest[marker + BASE64_MARKER.len()..];

    if content_type.is_empty() || encoded.is_empty() {
        return None;
    }
    Some((content_type, encoded))
}
