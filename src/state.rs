//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::MediaService;
use crate::infrastructure::cache::CacheService;

/// State cloned into every request handler.
///
/// Holds only shared handles; no per-request data lives here.
#[derive(Clone)]
pub struct AppState {
    pub media_service: Arc<MediaService>,
    pub cache: Arc<dyn CacheService>,
}

impl AppState {
    pub fn new(media_service: Arc<MediaService>, cache: Arc<dyn CacheService>) -> Self {
        Self {
            media_service,
            cache,
        }
    }
}
