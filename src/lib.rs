//! # Media Proxy
//!
//! A caching HTTP proxy in front of a third-party streaming-metadata API, built with
//! Axum and Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Media query model, cache key and upstream URL derivation
//! - **Application Layer** ([`application`]) - Cache-aside request flow
//! - **Infrastructure Layer** ([`infrastructure`]) - Redis cache and upstream HTTP client
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Request Flow
//!
//! `GET /api/rabbit/fetch?mediaId=..&seasonNum=..&epNum=..`
//!
//! 1. Query parameters are validated (`mediaId` required)
//! 2. The cache is consulted under `<mediaId>/<seasonNum>/<epNum>`
//! 3. On miss the upstream API is called and its JSON stored for 30 minutes
//! 4. The JSON is returned unchanged
//!
//! ## Quick Start
//!
//! ```bash
//! export UPSTREAM_API_KEY="..."
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{CachePolicy, MediaService};
    pub use crate::domain::{CacheKey, MediaQuery, StreamPayload};
    pub use crate::error::AppError;
    pub use crate::infrastructure::cache::{CacheError, CacheResult, CacheService};
    pub use crate::infrastructure::upstream::{UpstreamClient, UpstreamError};
    pub use crate::state::AppState;
}
