//! Promo code endpoint

use reqwest::StatusCode;

use crate::PortalClient;
use crate::error::{ClientError, Result};
use portal_core::dto::promo::{PromoRequest, PromoResponse};

impl PortalClient {
    /// Check whether a promo code is accepted
    ///
    /// A rejected code is answered with 400 `{"valid": false}`, which is
    /// reported as `Ok(false)` rather than an error.
    pub async fn validate_promo(&self, code: &str) -> Result<bool> {
        let url = format!("{}/api/validate-promo", self.base_url);
        let req = PromoRequest {
            code: Some(code.to_string()),
        };
        let response = self.client.post(&url).json(&req).send().await?;

        if response.status() == StatusCode::BAD_REQUEST {
            let text = response.text().await?;
            return match serde_json::from_str::<PromoResponse>(&text) {
                Ok(body) => Ok(body.valid),
                Err(_) => Err(ClientError::from_body(400, &text)),
            };
        }

        let body: PromoResponse = self.handle_response(response).await?;
        Ok(body.valid)
    }
}
