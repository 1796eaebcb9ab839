//! Music search DTOs
//!
//! The server relays iTunes Search API responses verbatim; the typed
//! structures here are a read-only view used for display.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicSearchQuery {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MusicLookupQuery {
    #[serde(default)]
    pub id: Option<String>,
}

/// Search or lookup response from the iTunes API
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackResults {
    #[serde(default)]
    pub result_count: u64,
    #[serde(default)]
    pub results: Vec<Track>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Track {
    #[serde(default)]
    pub wrapper_type: Option<String>,
    #[serde(default)]
    pub track_id: Option<u64>,
    #[serde(default)]
    pub track_name: Option<String>,
    #[serde(default)]
    pub artist_name: Option<String>,
    #[serde(default)]
    pub collection_name: Option<String>,
    #[serde(default)]
    pub preview_url: Option<String>,
}

impl TrackResults {
    /// Only entries that are actual tracks (lookups also return the album)
    pub fn tracks(&self) -> impl Iterator<Item = &Track> {
        self.results
            .iter()
            .filter(|t| t.wrapper_type.as_deref().is_none_or(|w| w == "track"))
    }
}
