//! Promo API Handler

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use portal_core::dto::promo::{PromoRequest, PromoResponse};

use crate::AppState;
use crate::api::error::ApiResult;

/// POST /api/validate-promo
/// Check a promo code; invalid codes answer 400 with `{"valid": false}`
pub async fn validate_promo(
    State(state): State<AppState>,
    body: Result<Json<PromoRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<PromoResponse>)> {
    let Json(req) = body?;

    let valid = state.promo_codes.is_valid(req.code.as_deref());
    tracing::debug!("Promo code checked (valid: {})", valid);

    let status = if valid {
        StatusCode::OK
    } else {
        StatusCode::BAD_REQUEST
    };
    Ok((status, Json(PromoResponse { valid })))
}
