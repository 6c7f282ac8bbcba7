mod common;

use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use common::{MemoryCache, StubUpstream};
use media_proxy::application::services::CachePolicy;
use media_proxy::routes::app_router;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

const ALLOWED_ORIGIN: &str = "http://localhost:5173";

fn app() -> tower_http::normalize_path::NormalizePath<axum::Router> {
    let state = common::create_test_state(
        Arc::new(StubUpstream::returning(json!({ "url": "http://x" }))),
        Arc::new(MemoryCache::new()),
        CachePolicy::default(),
    );
    app_router(state, ALLOWED_ORIGIN)
}

#[tokio::test]
async fn test_router_serves_media_endpoint() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/rabbit/fetch?mediaId=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json: Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json, json!({ "url": "http://x" }));
}

#[tokio::test]
async fn test_router_trims_trailing_slash() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/rabbit/fetch/?mediaId=abc123")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_router_cors_allowed_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/rabbit/fetch?mediaId=abc123")
                .header(header::ORIGIN, ALLOWED_ORIGIN)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
}

#[tokio::test]
async fn test_router_cors_other_origin() {
    let response = app()
        .oneshot(
            Request::builder()
                .uri("/api/rabbit/fetch?mediaId=abc123")
                .header(header::ORIGIN, "https://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_router_cors_preflight() {
    let response = app()
        .oneshot(
            Request::builder()
                .method(Method::OPTIONS)
                .uri("/api/rabbit/fetch")
                .header(header::ORIGIN, ALLOWED_ORIGIN)
                .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        ALLOWED_ORIGIN
    );
    let methods = response.headers()[header::ACCESS_CONTROL_ALLOW_METHODS]
        .to_str()
        .unwrap();
    assert!(methods.contains("GET"));
}

#[tokio::test]
async fn test_router_health() {
    let response = app()
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
