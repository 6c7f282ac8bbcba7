//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the two collaborators the request flow depends on.
//!
//! # Modules
//!
//! - [`cache`] - Key-value cache abstractions (Redis and no-op implementations)
//! - [`upstream`] - Outbound client for the streaming-metadata API

pub mod cache;
pub mod upstream;
