//! Portal API Handlers
//!
//! HTTP endpoints for saving and opening portals.

use axum::{
    Json,
    extract::{Query, State, rejection::JsonRejection},
    http::HeaderMap,
};
use portal_core::dto::error::ErrorBody;
use portal_core::dto::portal::{
    LoadPortalQuery, PASSWORD_HEADER, PortalView, SavePortal, SavedPortal,
};

use crate::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::db;
use crate::service::portal_service::{self, PortalError};

/// POST /api/portal
/// Create or overwrite a portal
pub async fn save_portal(
    State(state): State<AppState>,
    body: Result<Json<SavePortal>, JsonRejection>,
) -> ApiResult<Json<SavedPortal>> {
    let Json(req) = body?;
    tracing::debug!("Saving portal: {}", req.id.as_deref().unwrap_or("<new>"));

    let saved = portal_service::save_portal(&state.pool, req)
        .await
        .map_err(save_error)?;

    Ok(Json(saved))
}

/// GET /api/portal?id=
/// Open a portal
///
/// The password of a protected portal may be sent in the
/// `x-portal-password` header or the `password` query parameter.
pub async fn load_portal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<LoadPortalQuery>,
) -> ApiResult<Json<PortalView>> {
    let id = query
        .id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .ok_or_else(|| ApiError::bad_request("missing_id"))?;

    let password = headers
        .get(PASSWORD_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .or(query.password.as_deref());

    tracing::debug!("Loading portal: {}", id);

    let view = portal_service::load_portal(&state.pool, id, password)
        .await
        .map_err(load_error)?;

    Ok(Json(view))
}

fn save_error(e: PortalError) -> ApiError {
    match e {
        PortalError::ValidationError(msg) => {
            ApiError::BadRequest(ErrorBody::new("invalid_data").with_details(msg))
        }
        PortalError::DatabaseError(err) if db::is_missing_table(&err) => {
            tracing::error!("Portals table is missing: {:?}", err);
            ApiError::InternalError(
                ErrorBody::new("table_missing")
                    .with_message("Run `portal db migrate` to create the portals table."),
            )
        }
        PortalError::DatabaseError(err) => ApiError::database("save_failed", err),
        other => ApiError::internal("save_failed", other),
    }
}

fn load_error(e: PortalError) -> ApiError {
    match e {
        PortalError::NotFound(_) => ApiError::not_found("not_found"),
        PortalError::InvalidPassword => ApiError::unauthorized("invalid_password"),
        PortalError::ValidationError(msg) => {
            ApiError::BadRequest(ErrorBody::new("invalid_request").with_details(msg))
        }
        PortalError::AuthError(err) => ApiError::internal("auth_error", err),
        PortalError::HashingFailed(msg) => ApiError::internal("auth_error", msg),
        PortalError::DatabaseError(err) => ApiError::database("load_failed", err),
    }
}
