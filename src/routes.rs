//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET /api/rabbit/fetch` - Stream metadata lookup
//! - `GET /health`           - Health check: cache backend
//!
//! # Middleware
//!
//! - **CORS** - Single allowed origin, `GET` only
//! - **Tracing** - Structured request/response logging
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `allowed_origin` - origin admitted by the CORS policy (`"*"` for any)
pub fn app_router(state: AppState, allowed_origin: &str) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/health", get(health_handler))
        .nest("/api", api::routes::public_routes())
        .with_state(state)
        .layer(cors::layer(allowed_origin))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
