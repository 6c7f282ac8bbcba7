//! HTTP request/response tracing middleware.

use tower_http::LatencyUnit;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

/// Creates a tracing middleware for HTTP requests.
///
/// Opens an `INFO` span per request (method, URI, version) and logs the response
/// status with latency in milliseconds. Cache branch lines emitted by
/// [`crate::application::services::MediaService`] are nested inside this span.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET uri=/api/rabbit/fetch?mediaId=abc123 version=HTTP/1.1}: Cache MISS cache_key=abc123/undefined/undefined
/// INFO request{method=GET uri=/api/rabbit/fetch?mediaId=abc123 version=HTTP/1.1}: Cache populated cache_key=abc123/undefined/undefined ttl_seconds=1800
/// INFO request{method=GET uri=/api/rabbit/fetch?mediaId=abc123 version=HTTP/1.1}: finished processing request latency=212 ms status=200
/// ```
pub fn layer()
-> TraceLayer<tower_http::classify::SharedClassifier<tower_http::classify::ServerErrorsAsFailures>>
{
    TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        )
}
