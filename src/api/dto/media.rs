//! DTOs for the media lookup endpoint.

use serde::Deserialize;
use validator::{Validate, ValidationError};

use crate::domain::{MediaQuery, is_dot_segment};

/// Query string of `GET /api/rabbit/fetch`.
///
/// Field names follow the public API (`mediaId`, `seasonNum`, `epNum`).
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct MediaQueryParams {
    /// Upstream media identifier.
    #[validate(
        length(min = 1, message = "mediaId must not be empty"),
        custom(function = "validate_media_id")
    )]
    pub media_id: String,

    /// Season number; only used together with `ep_num`.
    pub season_num: Option<String>,

    /// Episode number; only used together with `season_num`.
    pub ep_num: Option<String>,
}

fn validate_media_id(media_id: &str) -> Result<(), ValidationError> {
    if is_dot_segment(media_id) {
        return Err(ValidationError::new("dot_segment")
            .with_message("mediaId must not be '.' or '..'".into()));
    }
    Ok(())
}

impl From<MediaQueryParams> for MediaQuery {
    fn from(params: MediaQueryParams) -> Self {
        MediaQuery::new(params.media_id, params.season_num, params.ep_num)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_media_id_is_invalid() {
        let params = MediaQueryParams {
            media_id: String::new(),
            season_num: None,
            ep_num: None,
        };
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_dot_segment_media_id_is_invalid() {
        for id in [".", "..", "%2E%2E"] {
            let params = MediaQueryParams {
                media_id: id.to_string(),
                season_num: None,
                ep_num: None,
            };
            assert!(params.validate().is_err(), "{id} should be rejected");
        }
    }

    #[test]
    fn test_into_media_query() {
        let params = MediaQueryParams {
            media_id: "abc123".to_string(),
            season_num: Some("1".to_string()),
            ep_num: Some("2".to_string()),
        };
        assert!(params.validate().is_ok());

        let query = MediaQuery::from(params);
        assert_eq!(query.media_id, "abc123");
        assert_eq!(query.episode(), Some(("1", "2")));
    }
}
