//! Portal domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::payload;

/// A stored celebration portal
///
/// Structure shared between the server (persists and serves) and the CLI
/// (inspects and repairs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Portal {
    pub id: String,
    pub payload: Value,
    pub pass: Option<PassMeta>,
    pub views: i64,
    pub created_at: Option<DateTime<Utc>>,
}

/// Password protection metadata
///
/// Mirrors the nullable `pass_*` columns. Only `hash` is required for a
/// portal to count as protected; the remaining fields fall back to the
/// hashing defaults when absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassMeta {
    pub salt: Option<String>,
    pub hash: String,
    pub iterations: Option<u32>,
    pub digest: Option<String>,
}

impl Portal {
    pub fn is_protected(&self) -> bool {
        self.pass.is_some()
    }

    pub fn celebration_type(&self) -> String {
        payload::celebration_type(&self.payload)
    }

    pub fn recipient_name(&self) -> String {
        payload::recipient_name(&self.payload)
    }

    pub fn sender_name(&self) -> String {
        payload::sender_name(&self.payload)
    }

    pub fn template(&self) -> String {
        payload::template(&self.payload)
    }
}
