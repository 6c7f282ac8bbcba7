//! Business logic services for the application layer.

pub mod media_service;

pub use media_service::{CachePolicy, MediaService};
