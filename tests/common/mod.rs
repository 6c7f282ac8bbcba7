#![allow(dead_code)]

use async_trait::async_trait;
use media_proxy::application::services::{CachePolicy, MediaService};
use media_proxy::domain::StreamPayload;
use media_proxy::infrastructure::cache::{CacheError, CacheResult, CacheService};
use media_proxy::infrastructure::upstream::{UpstreamClient, UpstreamError};
use media_proxy::state::AppState;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use url::Url;

pub const UPSTREAM_BASE: &str = "https://upstream.test/rabbit/fetch";

/// In-memory cache recording the TTL of every write.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, (String, u64)>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(key: &str, value: &str) -> Self {
        let cache = Self::new();
        cache
            .entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), 1800));
        cache
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .unwrap()
            .get(key)
            .map(|(value, _)| value.clone())
    }

    pub fn ttl(&self, key: &str) -> Option<u64> {
        self.entries.lock().unwrap().get(key).map(|(_, ttl)| *ttl)
    }

    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl CacheService for MemoryCache {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        Ok(self.value(key))
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> CacheResult<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), (value.to_string(), ttl_seconds));
        Ok(())
    }

    async fn invalidate(&self, key: &str) -> CacheResult<bool> {
        Ok(self.entries.lock().unwrap().remove(key).is_some())
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Cache whose backend is permanently down.
pub struct FailingCache;

#[async_trait]
impl CacheService for FailingCache {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn set(&self, _key: &str, _value: &str, _ttl_seconds: u64) -> CacheResult<()> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn invalidate(&self, _key: &str) -> CacheResult<bool> {
        Err(CacheError::ConnectionError("connection refused".to_string()))
    }

    async fn health_check(&self) -> bool {
        false
    }
}

/// Upstream stub that records requested URLs and answers with a fixed result.
pub struct StubUpstream {
    payload: Option<StreamPayload>,
    calls: Mutex<Vec<Url>>,
}

impl StubUpstream {
    pub fn returning(payload: StreamPayload) -> Self {
        Self {
            payload: Some(payload),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            payload: None,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn calls(&self) -> Vec<Url> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl UpstreamClient for StubUpstream {
    async fn fetch_json(&self, url: &Url) -> Result<StreamPayload, UpstreamError> {
        self.calls.lock().unwrap().push(url.clone());
        self.payload
            .clone()
            .ok_or_else(|| UpstreamError::Network("connection reset by peer".to_string()))
    }
}

pub fn create_test_state(
    upstream: Arc<StubUpstream>,
    cache: Arc<dyn CacheService>,
    policy: CachePolicy,
) -> AppState {
    let media_service = Arc::new(MediaService::new(
        upstream,
        cache.clone(),
        Url::parse(UPSTREAM_BASE).unwrap(),
        policy,
    ));

    AppState::new(media_service, cache)
}
