//! Portal HTTP Client
//!
//! A simple, type-safe HTTP client for the celebration portal API.
//!
//! # Example
//!
//! ```no_run
//! use portal_client::PortalClient;
//! use portal_core::dto::portal::SavePortal;
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), portal_client::ClientError> {
//!     let client = PortalClient::new("http://localhost:8787");
//!
//!     let saved = client
//!         .save_portal(SavePortal {
//!             id: None,
//!             data: Some(json!({ "recipientName": "Ada", "celebrationType": "birthday" })),
//!         })
//!         .await?;
//!
//!     println!("Created portal: {}", saved.id);
//!     Ok(())
//! }
//! ```

pub mod error;
mod music;
mod portals;
mod promo;
mod uploads;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use uploads::data_url;

use reqwest::Client;
use serde::de::DeserializeOwned;

/// HTTP client for the portal API
///
/// Methods are grouped by endpoint family:
/// - Portals (save, load)
/// - Uploads
/// - Music search and lookup
/// - Promo codes and health
#[derive(Debug, Clone)]
pub struct PortalClient {
    /// Base URL of the API (e.g., "http://localhost:8787")
    base_url: String,
    /// HTTP client instance
    client: Client,
}

impl PortalClient {
    /// Create a new portal client
    ///
    /// # Example
    /// ```
    /// use portal_client::PortalClient;
    ///
    /// let client = PortalClient::new("http://localhost:8787");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new portal client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health
    pub async fn health(&self) -> Result<()> {
        let url = format!("{}/health", self.base_url);
        let response = self.client.get(&url).send().await?;

        self.handle_empty_response(response).await
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Check the status code and deserialize the JSON body
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Check the status code of a response whose body is not needed
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(ClientError::from_body(status.as_u16(), &error_text));
        }

        Ok(())
    }
}
