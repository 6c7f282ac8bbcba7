//! CLI tool for inspecting the media-proxy cache.
//!
//! Works directly against the Redis instance the server uses, so operators can see
//! and evict cached upstream payloads without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Print the cache key for a lookup
//! cargo run --bin cachectl -- key --media-id tt0903747 --season-num 1 --ep-num 2
//!
//! # Show the cached payload
//! cargo run --bin cachectl -- get --media-id tt0903747
//!
//! # Evict an entry so the next request refetches it
//! cargo run --bin cachectl -- purge --media-id tt0903747 --yes
//!
//! # Check Redis connectivity
//! cargo run --bin cachectl -- ping
//! ```
//!
//! # Environment Variables
//!
//! - `REDIS_URL` or `REDIS_HOST`/`REDIS_PORT`/`REDIS_PASSWORD`/`REDIS_DB`

use media_proxy::config::Config;
use media_proxy::domain::MediaQuery;
use media_proxy::infrastructure::cache::{CacheService, RedisCache};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing the media-proxy cache.
#[derive(Parser)]
#[command(name = "cachectl")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the cache key for a lookup
    Key(MediaArgs),

    /// Show the cached payload for a lookup
    Get(MediaArgs),

    /// Remove the cached payload for a lookup
    Purge {
        #[command(flatten)]
        media: MediaArgs,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Check Redis connection
    Ping,
}

/// Lookup parameters, mirroring the HTTP query string.
#[derive(Args)]
struct MediaArgs {
    /// Upstream media identifier
    #[arg(short, long)]
    media_id: String,

    /// Season number
    #[arg(short, long)]
    season_num: Option<String>,

    /// Episode number
    #[arg(short, long)]
    ep_num: Option<String>,
}

impl From<MediaArgs> for MediaQuery {
    fn from(args: MediaArgs) -> Self {
        MediaQuery::new(args.media_id, args.season_num, args.ep_num)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Key(media) => {
            println!("{}", MediaQuery::from(media).cache_key());
        }
        Commands::Get(media) => {
            let cache = connect().await?;
            show_entry(&cache, media.into()).await?;
        }
        Commands::Purge { media, yes } => {
            let cache = connect().await?;
            purge_entry(&cache, media.into(), yes).await?;
        }
        Commands::Ping => {
            let cache = connect().await?;
            if cache.health_check().await {
                println!("{}", "✅ Redis is reachable".green().bold());
            } else {
                anyhow::bail!("Redis PING failed");
            }
        }
    }

    Ok(())
}

/// Connects to the Redis instance configured in the environment.
async fn connect() -> Result<RedisCache> {
    let redis_url = Config::load_redis_url().context("REDIS_URL or REDIS_HOST must be set")?;

    RedisCache::connect(&redis_url)
        .await
        .context("Failed to connect to Redis")
}

/// Prints the cached payload, pretty-printed when it is valid JSON.
async fn show_entry(cache: &RedisCache, query: MediaQuery) -> Result<()> {
    let key = query.cache_key();

    let Some(raw) = cache.get(key.as_str()).await? else {
        println!("{} {}", "Not cached:".yellow(), key.to_string().cyan());
        return Ok(());
    };

    println!("{} {}", "Cached:".bright_white().bold(), key.to_string().cyan());

    match serde_json::from_str::<serde_json::Value>(&raw) {
        Ok(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        Err(_) => {
            println!("{}", "⚠️  Entry is not valid JSON and will be refetched".red());
            println!("{}", raw);
        }
    }

    Ok(())
}

/// Deletes the cached payload after confirmation.
async fn purge_entry(cache: &RedisCache, query: MediaQuery, skip_confirm: bool) -> Result<()> {
    let key = query.cache_key();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Purge cache entry '{}'?", key))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    if cache.invalidate(key.as_str()).await? {
        println!("{} {}", "✅ Purged".green().bold(), key.to_string().cyan());
    } else {
        println!("{} {}", "Nothing to purge:".yellow(), key.to_string().cyan());
    }

    Ok(())
}
