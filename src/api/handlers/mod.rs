//! HTTP request handlers for API endpoints.

pub mod health;
pub mod media;

pub use health::health_handler;
pub use media::fetch_media_handler;
