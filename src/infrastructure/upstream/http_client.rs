//! `reqwest`-backed upstream client.

use super::client::{UpstreamClient, UpstreamError};
use crate::domain::StreamPayload;
use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::redirect::Policy;
use tracing::debug;
use url::Url;

/// Header carrying the shared secret expected by the upstream API.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Maximum number of redirects followed before the request fails.
const MAX_REDIRECTS: usize = 10;

/// HTTP client for the streaming-metadata API.
///
/// The API key is installed as a default header marked sensitive, so it is attached to
/// every request and never printed by `reqwest`'s debug output. Cloning is cheap; the
/// underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct HttpUpstreamClient {
    client: Client,
}

impl HttpUpstreamClient {
    /// Builds a client that authenticates every request with `api_key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the key is not a valid header value or the TLS backend
    /// fails to initialise.
    pub fn new(api_key: &str) -> Result<Self> {
        let mut key =
            HeaderValue::from_str(api_key).context("API key is not a valid header value")?;
        key.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(HeaderName::from_static(API_KEY_HEADER), key);

        let client = Client::builder()
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build upstream HTTP client")?;

        Ok(Self { client })
    }
}

#[async_trait]
impl UpstreamClient for HttpUpstreamClient {
    async fn fetch_json(&self, url: &Url) -> Result<StreamPayload, UpstreamError> {
        debug!(%url, "Upstream GET");

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::HttpStatus(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| UpstreamError::Network(e.to_string()))?;

        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_rejects_invalid_key() {
        assert!(HttpUpstreamClient::new("bad\nkey").is_err());
    }

    #[test]
    fn test_new_accepts_plain_key() {
        assert!(HttpUpstreamClient::new("test-api-key").is_ok());
    }
}
