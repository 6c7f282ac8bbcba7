//! HTTP server initialization and runtime setup.
//!
//! Handles cache setup, upstream client construction, and Axum server lifecycle.

use crate::application::services::{CachePolicy, MediaService};
use crate::config::Config;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::upstream::HttpUpstreamClient;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::Result;
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Redis cache (or NullCache fallback with caching disabled)
/// - Upstream HTTP client
/// - Axum HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The upstream client cannot be built
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (cache, policy) = connect_cache(&config).await;

    let upstream = Arc::new(HttpUpstreamClient::new(config.upstream_api_key.expose())?);

    let media_service = Arc::new(MediaService::new(
        upstream,
        cache.clone(),
        config.upstream_base_url.clone(),
        policy,
    ));

    let state = AppState::new(media_service, cache);

    let app = app_router(state, &config.allowed_origin);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Picks the cache backend and the matching cache policy.
///
/// Redis failures at startup do not abort the server: it runs uncached instead.
async fn connect_cache(config: &Config) -> (Arc<dyn CacheService>, CachePolicy) {
    let disabled = || -> (Arc<dyn CacheService>, CachePolicy) {
        (Arc::new(NullCache::new()), CachePolicy::disabled())
    };

    if !config.is_cache_enabled() {
        if config.cache_enabled {
            tracing::info!("Cache disabled (Redis not configured)");
        } else {
            tracing::info!("Cache disabled (CACHE_ENABLED=false)");
        }
        return disabled();
    }

    let Some(redis_url) = &config.redis_url else {
        return disabled();
    };

    match RedisCache::connect(redis_url).await {
        Ok(redis) => {
            tracing::info!("Cache enabled (Redis, TTL {}s)", config.cache_ttl_seconds);
            let cache: Arc<dyn CacheService> = Arc::new(redis);
            (cache, CachePolicy::enabled(config.cache_ttl_seconds))
        }
        Err(e) => {
            tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
            disabled()
        }
    }
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl-C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
