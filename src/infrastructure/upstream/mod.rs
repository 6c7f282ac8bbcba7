//! Outbound client for the streaming-metadata API.
//!
//! Provides an [`UpstreamClient`] trait with one production implementation:
//! - [`HttpUpstreamClient`] - `reqwest`-backed client authenticated with a static API key

mod client;
mod http_client;

pub use client::{UpstreamClient, UpstreamError};
pub use http_client::{API_KEY_HEADER, HttpUpstreamClient};

#[cfg(test)]
pub use client::MockUpstreamClient;
