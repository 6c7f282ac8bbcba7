//! Upstream client trait and error types.

use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::domain::StreamPayload;

/// Errors that can occur while fetching from the upstream API.
///
/// Every variant is reported to clients as the same generic failure; the variant only
/// shows up in logs.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// Connection, TLS, redirect or body-read failure.
    #[error("Upstream request failed: {0}")]
    Network(String),

    /// Upstream answered with a non-success status code.
    #[error("Upstream returned HTTP {0}")]
    HttpStatus(u16),

    /// Upstream body was not valid JSON.
    #[error("Failed to parse upstream response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Trait for fetching stream metadata from the upstream API.
///
/// # Implementations
///
/// - [`crate::infrastructure::upstream::HttpUpstreamClient`] - HTTP client with API key auth
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UpstreamClient: Send + Sync {
    /// Issues a GET to `url` and parses the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns [`UpstreamError`] on transport failure, non-2xx status, or a body
    /// that is not JSON. No retry is attempted.
    async fn fetch_json(&self, url: &Url) -> Result<StreamPayload, UpstreamError>;
}
