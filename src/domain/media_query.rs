//! Media lookup request model.

use url::Url;

use super::cache_key::CacheKey;

/// JSON returned by the upstream API.
///
/// Treated as an opaque pass-through value: no field is inspected or validated.
pub type StreamPayload = serde_json::Value;

/// Query parameter carrying the season number on the upstream API.
const SEASON_PARAM: &str = "ss";
/// Query parameter carrying the episode number on the upstream API.
const EPISODE_PARAM: &str = "ep";

/// Failure to build the upstream URL for a query.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamUrlError {
    /// The configured base URL cannot carry path segments (e.g. `mailto:` or `data:`).
    #[error("Upstream base URL cannot be a base: {0}")]
    CannotBeABase(String),

    /// The media id would be resolved away as `.` or `..` instead of kept as a segment.
    #[error("mediaId cannot be a dot segment: '{0}'")]
    DotSegment(String),
}

/// Returns true for ids that URL path resolution treats as `.` or `..`,
/// including their percent-encoded spellings (`%2e`, `.%2E`, ...).
pub fn is_dot_segment(value: &str) -> bool {
    let decoded = value.to_ascii_lowercase().replace("%2e", ".");
    decoded == "." || decoded == ".."
}

/// A single media lookup, built from the inbound query string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MediaQuery {
    pub media_id: String,
    pub season_num: Option<String>,
    pub ep_num: Option<String>,
}

impl MediaQuery {
    pub fn new(
        media_id: impl Into<String>,
        season_num: Option<String>,
        ep_num: Option<String>,
    ) -> Self {
        Self {
            media_id: media_id.into(),
            season_num,
            ep_num,
        }
    }

    /// Returns `(season, episode)` when the query targets a specific episode.
    ///
    /// Both values must be present and non-empty; a lone season or episode falls back
    /// to the movie-style lookup.
    pub fn episode(&self) -> Option<(&str, &str)> {
        match (self.season_num.as_deref(), self.ep_num.as_deref()) {
            (Some(season), Some(episode)) if !season.is_empty() && !episode.is_empty() => {
                Some((season, episode))
            }
            _ => None,
        }
    }

    /// Derives the cache key for this query.
    pub fn cache_key(&self) -> CacheKey {
        CacheKey::from_query(self)
    }

    /// Builds the upstream URL for this query.
    ///
    /// - Episode lookup: `<base>/<media_id>?ss=<season>&ep=<episode>`
    /// - Otherwise: `<base>/<media_id>`
    ///
    /// The media id is appended as a single percent-encoded path segment, so ids
    /// containing `/`, `?` or `#` cannot change the shape of the request.
    ///
    /// # Errors
    ///
    /// - [`UpstreamUrlError::DotSegment`] if the media id is a dot segment
    /// - [`UpstreamUrlError::CannotBeABase`] if `base` cannot carry path segments
    pub fn upstream_url(&self, base: &Url) -> Result<Url, UpstreamUrlError> {
        if is_dot_segment(&self.media_id) {
            return Err(UpstreamUrlError::DotSegment(self.media_id.clone()));
        }

        let mut url = base.clone();
        url.set_query(None);
        url.set_fragment(None);

        url.path_segments_mut()
            .map_err(|_| UpstreamUrlError::CannotBeABase(base.to_string()))?
            .pop_if_empty()
            .push(&self.media_id);

        if let Some((season, episode)) = self.episode() {
            url.query_pairs_mut()
                .append_pair(SEASON_PARAM, season)
                .append_pair(EPISODE_PARAM, episode);
        }

        Ok(url)
    }
}
