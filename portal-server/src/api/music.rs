//! Music API Handlers
//!
//! Proxy endpoints for the iTunes Search API. Successful responses are
//! cacheable by shared caches for an hour.

use axum::{
    Json,
    extract::{Query, State},
    http::header::CACHE_CONTROL,
    response::{IntoResponse, Response},
};
use portal_core::dto::error::ErrorBody;
use portal_core::dto::music::{MusicLookupQuery, MusicSearchQuery};
use serde_json::Value;

use crate::AppState;
use crate::api::error::{ApiError, ApiResult};
use crate::service::music_service::MusicError;

pub const CACHE_POLICY: &str = "s-maxage=3600, stale-while-revalidate";

/// GET /api/music_search?query=
/// Search songs
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<MusicSearchQuery>,
) -> ApiResult<Response> {
    let term = non_empty(query.query)
        .ok_or_else(|| ApiError::bad_request("Query parameter required"))?;

    tracing::info!("Searching iTunes for: {}", term);

    let result = state.music.search(&term).await;
    relay(result)
}

/// GET /api/music_lookup?id=
/// Look up a track by iTunes id
pub async fn lookup(
    State(state): State<AppState>,
    Query(query): Query<MusicLookupQuery>,
) -> ApiResult<Response> {
    let id = non_empty(query.id).ok_or_else(|| ApiError::bad_request("Id parameter required"))?;

    tracing::info!("Looking up iTunes id: {}", id);

    let result = state.music.lookup(&id).await;
    relay(result)
}

fn relay(result: Result<Value, MusicError>) -> ApiResult<Response> {
    match result {
        Ok(data) => Ok(([(CACHE_CONTROL, CACHE_POLICY)], Json(data)).into_response()),
        Err(err) => {
            tracing::error!("Music search error: {}", err);
            Err(ApiError::InternalError(
                ErrorBody::new("Failed to fetch music").with_details(err.to_string()),
            ))
        }
    }
}

/// Only a missing or empty parameter is rejected; whitespace goes upstream as-is
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
