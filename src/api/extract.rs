//! Request extractors that report failures as [`AppError`].

use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::de::DeserializeOwned;
use serde_json::json;
use validator::Validate;

use crate::error::AppError;

/// Query string extractor that deserializes and then validates `T`.
///
/// Both a missing/malformed parameter and a failed validation rule are rejected
/// with `400 Bad Request` in the standard error body, before the handler runs.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(ValidatedQuery(params): ValidatedQuery<MediaQueryParams>) { ... }
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                AppError::bad_request(
                    "Invalid query parameters",
                    json!({ "reason": rejection.body_text() }),
                )
            })?;

        value.validate()?;

        Ok(Self(value))
    }
}
