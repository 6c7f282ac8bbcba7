//! Domain layer containing the request model and its derived values.
//!
//! Nothing in here performs I/O: a [`MediaQuery`] is built per inbound request and
//! everything else (cache key, upstream URL) is a pure function of it.
//!
//! # Modules
//!
//! - [`media_query`] - Validated lookup request and upstream URL construction
//! - [`cache_key`] - Cache key derivation for stored payloads

pub mod cache_key;
pub mod media_query;

pub use cache_key::CacheKey;
pub use media_query::{MediaQuery, StreamPayload, UpstreamUrlError, is_dot_segment};
