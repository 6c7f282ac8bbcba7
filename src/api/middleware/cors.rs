//! Cross-origin request policy.

use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::warn;

/// Origin value that allows requests from any origin.
pub const ANY_ORIGIN: &str = "*";

/// Creates a CORS layer admitting a single configured origin.
///
/// - `"*"` allows any origin
/// - Any other value must be an exact origin such as `http://localhost:5173`
///
/// Only `GET` is allowed, matching the public surface. An origin that is not a valid
/// header value denies all cross-origin requests; [`crate::config::Config::validate`]
/// rejects such values at startup.
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .nest("/api", api_routes())
///     .layer(cors::layer("http://localhost:5173"));
/// ```
pub fn layer(allowed_origin: &str) -> CorsLayer {
    let origin = if allowed_origin == ANY_ORIGIN {
        AllowOrigin::from(Any)
    } else {
        match HeaderValue::from_str(allowed_origin) {
            Ok(value) => AllowOrigin::exact(value),
            Err(e) => {
                warn!("Invalid CORS origin '{}': {}", allowed_origin, e);
                AllowOrigin::list(Vec::<HeaderValue>::new())
            }
        }
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET])
}
