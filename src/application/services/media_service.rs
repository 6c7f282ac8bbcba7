//! Cache-aside lookup of stream metadata.

use std::sync::Arc;

use serde_json::json;
use tracing::{error, info, warn};
use url::Url;

use crate::domain::{CacheKey, MediaQuery, StreamPayload, UpstreamUrlError};
use crate::error::AppError;
use crate::infrastructure::cache::CacheService;
use crate::infrastructure::upstream::UpstreamClient;

/// Whether and for how long upstream payloads are cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CachePolicy {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

impl CachePolicy {
    /// Lifetime of a cached payload unless configured otherwise (30 minutes).
    pub const DEFAULT_TTL_SECONDS: u64 = 1800;

    pub fn enabled(ttl_seconds: u64) -> Self {
        Self {
            enabled: true,
            ttl_seconds,
        }
    }

    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ttl_seconds: Self::DEFAULT_TTL_SECONDS,
        }
    }
}

impl Default for CachePolicy {
    fn default() -> Self {
        Self::enabled(Self::DEFAULT_TTL_SECONDS)
    }
}

/// Resolves media queries against the upstream API, caching successful responses.
///
/// The service holds no mutable state of its own; concurrent requests only share the
/// cache backend. Two requests missing on the same key may both reach upstream.
pub struct MediaService {
    upstream: Arc<dyn UpstreamClient>,
    cache: Arc<dyn CacheService>,
    base_url: Url,
    policy: CachePolicy,
}

impl MediaService {
    /// Creates a new media service.
    pub fn new(
        upstream: Arc<dyn UpstreamClient>,
        cache: Arc<dyn CacheService>,
        base_url: Url,
        policy: CachePolicy,
    ) -> Self {
        Self {
            upstream,
            cache,
            base_url,
            policy,
        }
    }

    pub fn policy(&self) -> CachePolicy {
        self.policy
    }

    /// Returns the stream payload for `query`.
    ///
    /// # Request Flow
    ///
    /// 1. Build the upstream URL and cache key
    /// 2. Look the key up in cache; a hit is returned as-is
    /// 3. On miss, fetch upstream
    /// 4. Write the payload to cache with the configured TTL
    ///
    /// With caching disabled only step 3 runs.
    ///
    /// # Cache Failures
    ///
    /// - **Read error or unparsable entry**: treated as a miss
    /// - **Write error**: logged, the fetched payload is still returned
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Upstream`] if the upstream request fails for any reason.
    /// Nothing is cached in that case.
    pub async fn fetch(&self, query: &MediaQuery) -> Result<StreamPayload, AppError> {
        let url = query.upstream_url(&self.base_url).map_err(|e| match e {
            UpstreamUrlError::DotSegment(_) => {
                AppError::bad_request("Invalid mediaId", json!({ "reason": e.to_string() }))
            }
            UpstreamUrlError::CannotBeABase(_) => AppError::internal(
                "Invalid upstream configuration",
                json!({ "reason": e.to_string() }),
            ),
        })?;

        if !self.policy.enabled {
            return self.fetch_upstream(&url).await;
        }

        let key = query.cache_key();

        if let Some(payload) = self.lookup(&key).await {
            return Ok(payload);
        }

        let payload = self.fetch_upstream(&url).await?;
        self.populate(&key, &payload).await;

        Ok(payload)
    }

    async fn lookup(&self, key: &CacheKey) -> Option<StreamPayload> {
        match self.cache.get(key.as_str()).await {
            Ok(Some(cached)) => match serde_json::from_str(&cached) {
                Ok(payload) => {
                    info!(cache_key = %key, "Cache HIT");
                    Some(payload)
                }
                Err(e) => {
                    warn!(cache_key = %key, error = %e, "Unparsable cache entry, refetching");
                    None
                }
            },
            Ok(None) => {
                info!(cache_key = %key, "Cache MISS");
                None
            }
            Err(e) => {
                warn!(cache_key = %key, error = %e, "Cache read failed, treating as miss");
                None
            }
        }
    }

    async fn fetch_upstream(&self, url: &Url) -> Result<StreamPayload, AppError> {
        self.upstream.fetch_json(url).await.map_err(|e| {
            error!(%url, error = %e, "Upstream fetch failed");
            AppError::from(e)
        })
    }

    async fn populate(&self, key: &CacheKey, payload: &StreamPayload) {
        let serialized = payload.to_string();

        match self
            .cache
            .set(key.as_str(), &serialized, self.policy.ttl_seconds)
            .await
        {
            Ok(()) => info!(
                cache_key = %key,
                ttl_seconds = self.policy.ttl_seconds,
                "Cache populated"
            ),
            Err(e) => warn!(cache_key = %key, error = %e, "Failed to populate cache"),
        }
    }
}
