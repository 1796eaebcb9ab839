//! Portal DTOs

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Header carrying the password of a protected portal on load requests
pub const PASSWORD_HEADER: &str = "x-portal-password";

/// Request to create or overwrite a portal
///
/// `id` is generated when absent. A `passcode` field inside `data` is hashed
/// server-side and never stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SavePortal {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPortal {
    pub id: String,
}

/// Query for loading a portal
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoadPortalQuery {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Result of loading a portal
///
/// Protected portals requested without a password only reveal that they
/// are protected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PortalView {
    Protected {
        protected: bool,
        id: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        hint: Option<String>,
    },
    Unlocked {
        data: Value,
    },
}

impl PortalView {
    pub fn locked(id: impl Into<String>) -> Self {
        PortalView::Protected {
            protected: true,
            id: id.into(),
            hint: Some("Password required".to_string()),
        }
    }

    pub fn is_locked(&self) -> bool {
        matches!(self, PortalView::Protected { .. })
    }

    /// View count reported alongside an unlocked payload
    pub fn views(&self) -> Option<i64> {
        match self {
            PortalView::Unlocked { data } => data.get("stats")?.get("views")?.as_i64(),
            PortalView::Protected { .. } => None,
        }
    }
}
