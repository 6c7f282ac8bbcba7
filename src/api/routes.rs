//! API route configuration.

use crate::api::handlers::fetch_media_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// All public API routes.
///
/// # Endpoints
///
/// - `GET /rabbit/fetch` - Stream metadata lookup (cache-aside)
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/rabbit/fetch", get(fetch_media_handler))
}
