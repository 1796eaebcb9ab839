//! Portal endpoints

use crate::PortalClient;
use crate::error::Result;
use portal_core::dto::portal::{PASSWORD_HEADER, PortalView, SavePortal, SavedPortal};

impl PortalClient {
    /// Create or overwrite a portal
    ///
    /// # Arguments
    /// * `req` - Portal id (optional) and payload; a `passcode` field in the
    ///   payload protects the portal
    ///
    /// # Returns
    /// The id the portal was stored under
    ///
    /// # Example
    /// ```no_run
    /// # use portal_client::PortalClient;
    /// # use portal_core::dto::portal::SavePortal;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = PortalClient::new("http://localhost:8787");
    /// let saved = client.save_portal(SavePortal {
    ///     id: Some("party42".to_string()),
    ///     data: Some(serde_json::json!({ "passcode": "1234" })),
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn save_portal(&self, req: SavePortal) -> Result<SavedPortal> {
        let url = format!("{}/api/portal", self.base_url);
        let response = self.client.post(&url).json(&req).send().await?;

        self.handle_response(response).await
    }

    /// Load a portal by id
    ///
    /// Protected portals loaded without a password come back as
    /// [`PortalView::Protected`]; a wrong password is a 401 error.
    pub async fn load_portal(&self, id: &str, password: Option<&str>) -> Result<PortalView> {
        let url = format!("{}/api/portal", self.base_url);
        let mut request = self.client.get(&url).query(&[("id", id)]);
        if let Some(password) = password {
            request = request.header(PASSWORD_HEADER, password);
        }
        let response = request.send().await?;

        self.handle_response(response).await
    }
}
