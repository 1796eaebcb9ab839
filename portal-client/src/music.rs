//! Music proxy endpoints

use crate::PortalClient;
use crate::error::Result;
use portal_core::dto::music::TrackResults;

impl PortalClient {
    /// Search songs by free-text term
    pub async fn search_music(&self, query: &str) -> Result<TrackResults> {
        let url = format!("{}/api/music_search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Look up a track or collection by iTunes id
    pub async fn lookup_music(&self, id: &str) -> Result<TrackResults> {
        let url = format!("{}/api/music_lookup", self.base_url);
        let response = self.client.get(&url).query(&[("id", id)]).send().await?;

        self.handle_response(response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_music() -> anyhow::Result<()> {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/music_search")
                .query_param("query", "happy birthday");
            then.status(200).json_body(json!({
                "resultCount": 1,
                "results": [{
                    "wrapperType": "track",
                    "trackId": 42,
                    "trackName": "Happy Birthday",
                    "artistName": "Choir",
                    "previewUrl": "https://audio.test/42.m4a"
                }]
            }));
        });

        let results = PortalClient::new(server.base_url())
            .search_music("happy birthday")
            .await?;

        assert_eq!(results.result_count, 1);
        let track = results.tracks().next().unwrap();
        assert_eq!(track.track_id, Some(42));
        assert_eq!(track.track_name.as_deref(), Some("Happy Birthday"));
        Ok(())
    }

    #[tokio::test]
    async fn test_lookup_music_error() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/api/music_lookup");
            then.status(500).json_body(json!({
                "error": "Failed to fetch music",
                "details": "iTunes API error: 503"
            }));
        });

        let err = PortalClient::new(server.base_url())
            .lookup_music("42")
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "API error (status 500): Failed to fetch music: iTunes API error: 503"
        );
    }
}
