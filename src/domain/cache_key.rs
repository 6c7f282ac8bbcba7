//! Cache key derivation.
//!
//! Keys use the layout already present in deployed stores:
//!
//! ```text
//! <media_id>/<season_num>/<ep_num>
//! ```
//!
//! An absent season or episode is written as the literal [`ABSENT_TOKEN`]. A present
//! value is written verbatim, empty strings included. As a consequence a query whose
//! season is literally `"undefined"` shares its key with a query that omits the season.

use std::fmt;

use super::media_query::MediaQuery;

/// Placeholder written in place of a missing season or episode.
pub const ABSENT_TOKEN: &str = "undefined";

/// Key under which an upstream payload is cached.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn from_query(query: &MediaQuery) -> Self {
        let season = query.season_num.as_deref().unwrap_or(ABSENT_TOKEN);
        let episode = query.ep_num.as_deref().unwrap_or(ABSENT_TOKEN);
        Self(format!("{}/{}/{}", query.media_id, season, episode))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
