//! Music Service
//!
//! Thin proxy over the iTunes Search API. Responses are relayed verbatim.

use serde_json::Value;
use thiserror::Error;

/// Number of tracks requested per search
pub const SEARCH_LIMIT: u32 = 20;

#[derive(Debug, Error)]
pub enum MusicError {
    #[error("iTunes API error: {0}")]
    Upstream(u16),

    #[error("iTunes request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Client for the iTunes Search API
#[derive(Debug, Clone)]
pub struct MusicService {
    client: reqwest::Client,
    base_url: String,
}

impl MusicService {
    pub fn new(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Search songs by free-text term
    pub async fn search(&self, term: &str) -> Result<Value, MusicError> {
        let limit = SEARCH_LIMIT.to_string();
        self.get_json(
            "search",
            &[
                ("term", term),
                ("media", "music"),
                ("limit", limit.as_str()),
                ("entity", "song"),
            ],
        )
        .await
    }

    /// Look up a track or album by its iTunes id
    pub async fn lookup(&self, id: &str) -> Result<Value, MusicError> {
        self.get_json("lookup", &[("id", id), ("entity", "song")])
            .await
    }

    async fn get_json(&self, endpoint: &str, query: &[(&str, &str)]) -> Result<Value, MusicError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let response = self.client.get(&url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MusicError::Upstream(status.as_u16()));
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_search_forwards_term() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/search")
                .query_param("term", "rain dance")
                .query_param("media", "music")
                .query_param("limit", "20")
                .query_param("entity", "song");
            then.status(200)
                .json_body(json!({ "resultCount": 1, "results": [{ "trackName": "Raindance" }] }));
        });

        let service = MusicService::new(reqwest::Client::new(), server.base_url());
        let body = service.search("rain dance").await.unwrap();

        mock.assert();
        assert_eq!(body["resultCount"], 1);
        assert_eq!(body["results"][0]["trackName"], "Raindance");
    }

    #[tokio::test]
    async fn test_upstream_failure() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/lookup");
            then.status(503);
        });

        let service = MusicService::new(reqwest::Client::new(), server.base_url());
        let err = service.lookup("1712959419").await.unwrap_err();

        assert!(matches!(err, MusicError::Upstream(503)));
        assert_eq!(err.to_string(), "iTunes API error: 503");
    }
}
