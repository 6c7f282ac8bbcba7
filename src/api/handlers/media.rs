//! Handler for stream metadata lookups.

use axum::{Json, extract::State};

use crate::api::dto::media::MediaQueryParams;
use crate::api::extract::ValidatedQuery;
use crate::domain::{MediaQuery, StreamPayload};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the upstream stream payload for a media id, from cache when available.
///
/// # Endpoint
///
/// `GET /api/rabbit/fetch`
///
/// # Query Parameters
///
/// - `mediaId` (required): Upstream media identifier
/// - `seasonNum` (optional): Season number
/// - `epNum` (optional): Episode number
///
/// Season and episode are forwarded upstream only when both are present.
///
/// # Response
///
/// The upstream JSON body, unmodified:
///
/// ```json
/// { "url": "https://cdn.example/master.m3u8" }
/// ```
///
/// # Errors
///
/// - **400 Bad Request**: `mediaId` missing or empty
/// - **500 Internal Server Error**: upstream failed, body
///   `{ "error": "an error occured while scraping this media." }`
pub async fn fetch_media_handler(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<MediaQueryParams>,
) -> Result<Json<StreamPayload>, AppError> {
    let query = MediaQuery::from(params);
    let payload = state.media_service.fetch(&query).await?;
    Ok(Json(payload))
}
