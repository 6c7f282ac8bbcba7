mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use common::{FailingCache, MemoryCache, StubUpstream};
use media_proxy::api::handlers::health_handler;
use media_proxy::application::services::CachePolicy;
use media_proxy::infrastructure::cache::NullCache;
use media_proxy::state::AppState;
use serde_json::{Value, json};
use std::sync::Arc;

fn server(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_health_endpoint_success() {
    let state = common::create_test_state(
        Arc::new(StubUpstream::returning(json!({}))),
        Arc::new(MemoryCache::new()),
        CachePolicy::default(),
    );
    let server = server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["caching"], true);
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_cache_down() {
    let state = common::create_test_state(
        Arc::new(StubUpstream::returning(json!({}))),
        Arc::new(FailingCache),
        CachePolicy::default(),
    );
    let server = server(state);

    let response = server.get("/health").await;

    assert_eq!(response.status_code(), 503);

    let json = response.json::<Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["cache"]["status"], "error");
}

#[tokio::test]
async fn test_health_endpoint_caching_disabled() {
    let state = common::create_test_state(
        Arc::new(StubUpstream::returning(json!({}))),
        Arc::new(NullCache::new()),
        CachePolicy::disabled(),
    );
    let server = server(state);

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["caching"], false);
    assert_eq!(json["checks"]["cache"]["status"], "disabled");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let state = common::create_test_state(
        Arc::new(StubUpstream::returning(json!({}))),
        Arc::new(MemoryCache::new()),
        CachePolicy::default(),
    );
    let server = server(state);

    let json = server.get("/health").await.json::<Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("caching").is_some());
    assert!(json["checks"].get("cache").is_some());
}
