//! Application configuration loaded from environment variables.
//!
//! Configuration is loaded once at startup and validated before the server starts.
//!
//! ## Upstream API key
//!
//! The key is a credential and is never compiled into the binary. Provide it either
//! directly or through a mounted secret file (Docker/Kubernetes secrets):
//!
//! ```bash
//! export UPSTREAM_API_KEY="..."
//! # or
//! export UPSTREAM_API_KEY_FILE="/run/secrets/upstream_api_key"
//! ```
//!
//! ## Redis
//!
//! ```bash
//! export REDIS_URL="redis://localhost:6379/0"
//! # or
//! export REDIS_HOST="localhost"
//! export REDIS_PORT="6379"
//! export REDIS_PASSWORD=""
//! export REDIS_DB="0"
//! ```
//!
//! ## Optional Variables
//!
//! - `LISTEN` - Bind address (default: `0.0.0.0:3000`)
//! - `RUST_LOG` - Log level (default: `info`)
//! - `LOG_FORMAT` - Log format: `text` or `json` (default: `text`)
//! - `UPSTREAM_BASE_URL` - Upstream endpoint (default: `https://api.vidjoy.pro/rabbit/fetch`)
//! - `CORS_ALLOWED_ORIGIN` - Allowed browser origin, or `*` (default: `http://localhost:5173`)
//! - `CACHE_ENABLED` - Cache upstream responses (default: `true`, requires Redis)
//! - `CACHE_TTL_SECONDS` - Lifetime of cached responses (default: 1800)

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use std::{env, fmt, fs};
use url::Url;

use crate::api::middleware::cors::ANY_ORIGIN;
use crate::application::services::CachePolicy;

const DEFAULT_UPSTREAM_BASE_URL: &str = "https://api.vidjoy.pro/rabbit/fetch";
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:5173";

/// Upstream API key. Never printed.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen_addr: String,
    pub log_level: String,
    pub log_format: String,
    pub redis_url: Option<String>,
    /// Caches upstream responses when true and Redis is configured.
    pub cache_enabled: bool,
    /// TTL (seconds) for cached upstream responses.
    pub cache_ttl_seconds: u64,
    pub upstream_base_url: Url,
    pub upstream_api_key: ApiKey,
    /// Single origin admitted by the CORS policy, or `*`.
    pub allowed_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if the API key is missing or the upstream base URL does not parse.
    pub fn from_env() -> Result<Self> {
        let upstream_api_key =
            Self::load_api_key().context("Failed to load upstream API key")?;

        let upstream_base_url = env::var("UPSTREAM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_UPSTREAM_BASE_URL.to_string());
        let upstream_base_url = Url::parse(&upstream_base_url).with_context(|| {
            format!("UPSTREAM_BASE_URL is not a valid URL: '{}'", upstream_base_url)
        })?;

        let redis_url = Self::load_redis_url();

        let listen_addr = env::var("LISTEN").unwrap_or_else(|_| "0.0.0.0:3000".to_string());
        let log_level = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let log_format = env::var("LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

        let cache_enabled = env::var("CACHE_ENABLED")
            .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
            .unwrap_or(true);

        let cache_ttl_seconds = env::var("CACHE_TTL_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(CachePolicy::DEFAULT_TTL_SECONDS);

        let allowed_origin = env::var("CORS_ALLOWED_ORIGIN")
            .unwrap_or_else(|_| DEFAULT_ALLOWED_ORIGIN.to_string());

        Ok(Self {
            listen_addr,
            log_level,
            log_format,
            redis_url,
            cache_enabled,
            cache_ttl_seconds,
            upstream_base_url,
            upstream_api_key,
            allowed_origin,
        })
    }

    /// Loads the upstream API key.
    ///
    /// Priority:
    /// 1. `UPSTREAM_API_KEY` environment variable
    /// 2. Contents of the file named by `UPSTREAM_API_KEY_FILE`, surrounding whitespace trimmed
    fn load_api_key() -> Result<ApiKey> {
        if let Ok(key) = env::var("UPSTREAM_API_KEY") {
            return Ok(ApiKey::new(key));
        }

        let path = env::var("UPSTREAM_API_KEY_FILE")
            .context("UPSTREAM_API_KEY or UPSTREAM_API_KEY_FILE must be set")?;
        let key = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read UPSTREAM_API_KEY_FILE '{}'", path))?;

        Ok(ApiKey::new(key.trim()))
    }

    /// Loads Redis URL with fallback to component-based configuration.
    ///
    /// Priority:
    /// 1. `REDIS_URL` environment variable
    /// 2. Constructed from `REDIS_HOST`, `REDIS_PORT`, `REDIS_PASSWORD`, `REDIS_DB`
    ///
    /// Returns `None` if Redis is not configured.
    pub fn load_redis_url() -> Option<String> {
        if let Ok(url) = env::var("REDIS_URL") {
            return Some(url);
        }

        let host = env::var("REDIS_HOST").ok()?;
        let port = env::var("REDIS_PORT").unwrap_or_else(|_| "6379".to_string());
        let password = env::var("REDIS_PASSWORD").ok();
        let db = env::var("REDIS_DB").unwrap_or_else(|_| "0".to_string());

        let url = if let Some(pwd) = password {
            // Empty password means no authentication
            if pwd.is_empty() {
                format!("redis://{}:{}/{}", host, port, db)
            } else {
                format!("redis://:{}@{}:{}/{}", pwd, host, port, db)
            }
        } else {
            format!("redis://{}:{}/{}", host, port, db)
        };

        Some(url)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `log_format` is not `text` or `json`
    /// - `listen_addr` is invalid
    /// - the upstream base URL is not `http`/`https` or the API key is empty
    /// - the Redis URL scheme is wrong
    /// - `cache_ttl_seconds` is zero
    /// - `allowed_origin` is neither `*` nor an `http(s)://` origin
    pub fn validate(&self) -> Result<()> {
        if self.log_format != "text" && self.log_format != "json" {
            anyhow::bail!(
                "LOG_FORMAT must be 'text' or 'json', got '{}'",
                self.log_format
            );
        }

        if !self.listen_addr.contains(':') {
            anyhow::bail!(
                "LISTEN must be in format 'host:port', got '{}'",
                self.listen_addr
            );
        }

        let scheme = self.upstream_base_url.scheme();
        if scheme != "http" && scheme != "https" {
            anyhow::bail!(
                "UPSTREAM_BASE_URL must use http or https, got '{}'",
                self.upstream_base_url
            );
        }

        if self.upstream_api_key.expose().is_empty() {
            anyhow::bail!("UPSTREAM_API_KEY must not be empty");
        }

        if let Some(ref redis_url) = self.redis_url
            && !redis_url.starts_with("redis://")
            && !redis_url.starts_with("rediss://")
        {
            anyhow::bail!(
                "REDIS_URL must start with 'redis://' or 'rediss://', got '{}'",
                mask_connection_string(redis_url)
            );
        }

        if self.cache_ttl_seconds == 0 {
            anyhow::bail!("CACHE_TTL_SECONDS must be greater than 0");
        }

        if self.allowed_origin != ANY_ORIGIN {
            let looks_like_origin = self.allowed_origin.starts_with("http://")
                || self.allowed_origin.starts_with("https://");
            if !looks_like_origin || HeaderValue::from_str(&self.allowed_origin).is_err() {
                anyhow::bail!(
                    "CORS_ALLOWED_ORIGIN must be '*' or an http(s) origin, got '{}'",
                    self.allowed_origin
                );
            }
        }

        Ok(())
    }

    /// Returns whether Redis caching is enabled.
    pub fn is_cache_enabled(&self) -> bool {
        self.cache_enabled && self.redis_url.is_some()
    }

    /// Prints configuration summary (without sensitive data).
    pub fn print_summary(&self) {
        tracing::info!("Configuration loaded:");
        tracing::info!("  Listen address: {}", self.listen_addr);
        tracing::info!("  Upstream: {}", self.upstream_base_url);
        tracing::info!("  Upstream API key: ***");
        tracing::info!("  CORS origin: {}", self.allowed_origin);

        match (&self.redis_url, self.cache_enabled) {
            (Some(redis_url), true) => tracing::info!(
                "  Cache: {} (TTL {}s)",
                mask_connection_string(redis_url),
                self.cache_ttl_seconds
            ),
            (Some(_), false) => tracing::info!("  Cache: disabled (CACHE_ENABLED=false)"),
            (None, _) => tracing::info!("  Cache: disabled (Redis not configured)"),
        }

        tracing::info!("  Log level: {}", self.log_level);
        tracing::info!("  Log format: {}", self.log_format);
    }
}

/// Masks sensitive information in connection strings for logging.
///
/// Replaces password with `***` in URLs like:
/// - `redis://:password@host:port/db` → `redis://:***@host:port/db`
fn mask_connection_string(url: &str) -> String {
    if let Some(start) = url.find("://") {
        let scheme_end = start + 3;
        let rest = &url[scheme_end..];

        if let Some(at_pos) = rest.find('@') {
            let credentials = &rest[..at_pos];
            let host_part = &rest[at_pos..];

            if let Some(colon_pos) = credentials.rfind(':') {
                let username = &credentials[..colon_pos];
                return format!("{}://{}:***{}", &url[..start], username, host_part);
            }
        }
    }

    url.to_string()
}

/// Loads and validates configuration from environment variables.
///
/// # Errors
///
/// Returns an error if required variables are missing or validation fails.
///
/// # Note
///
/// This function expects environment variables to be already loaded
/// (e.g., via `dotenvy::dotenv()` in `main.rs`).
pub fn load_from_env() -> Result<Config> {
    let config = Config::from_env()?;
    config.validate()?;
    Ok(config)
}
