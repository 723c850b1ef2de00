// Query string and body extraction with JSON `{ message }` rejections

use axum::{
    async_trait,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
    Json,
};
use serde::de::{self, DeserializeOwned, Deserializer};
use serde::Deserialize;
use std::fmt::Display;
use std::str::FromStr;

use crate::api::errors::ApiError;

/// Comma-separated query value, e.g. `?categories=a,b,c`
///
/// Blank segments are dropped; every other segment must parse as `T`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delimited<T>(pub Vec<T>);

impl<T> Default for Delimited<T> {
    fn default() -> Self {
        Delimited(Vec::new())
    }
}

impl<T> Delimited<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<'de, T> Deserialize<'de> for Delimited<T>
where
    T: FromStr,
    T::Err: Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                segment
                    .parse::<T>()
                    .map_err(|e| de::Error::custom(format!("invalid value '{}': {}", segment, e)))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Delimited)
    }
}

/// Query extractor that rejects unknown or malformed params with a 400
///
/// Pair with `#[serde(deny_unknown_fields)]` on `T` to validate search keys.
pub struct ValidatedQuery<T>(pub T);

#[async_trait]
impl<T, S> FromRequestParts<S> for ValidatedQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        Ok(ValidatedQuery(value))
    }
}

/// JSON body extractor with a `{ message }` 400 rejection
pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;

        Ok(ValidatedJson(value))
    }
}

/// Query flag semantics: present and not `false`/`0`/empty
pub fn is_truthy(value: Option<&str>) -> bool {
    matches!(value.map(str::trim), Some(v) if !v.is_empty() && v != "false" && v != "0")
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::rejection::QueryRejection;
    use axum::http::Uri;
    use uuid::Uuid;

    #[derive(Debug, Deserialize)]
    #[serde(deny_unknown_fields, rename_all = "camelCase")]
    struct Search {
        #[serde(default)]
        podcast_id: Option<Delimited<Uuid>>,
        #[serde(default)]
        categories: Option<Delimited<String>>,
    }

    fn parse(query: &str) -> Result<Search, QueryRejection> {
        let uri: Uri = format!("/search?{}", query).parse().unwrap();
        Query::<Search>::try_from_uri(&uri).map(|Query(search)| search)
    }

    #[test]
    fn splits_comma_separated_values() {
        let search = parse("categories=news,,comedy").unwrap();

        assert_eq!(
            search.categories.unwrap().into_inner(),
            vec!["news".to_string(), "comedy".to_string()]
        );
    }

    #[test]
    fn parses_each_segment() {
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let search = parse(&format!("podcastId={},{}", a, b)).unwrap();

        assert_eq!(search.podcast_id.unwrap().0, vec![a, b]);
    }

    #[test]
    fn malformed_segment_rejected() {
        assert!(parse("podcastId=not-a-uuid").is_err());
    }

    #[test]
    fn unknown_key_rejected() {
        assert!(parse("bogus=1").is_err());
    }

    #[test]
    fn truthy_flags() {
        assert!(is_truthy(Some("true")));
        assert!(is_truthy(Some("1")));
        assert!(!is_truthy(Some("false")));
        assert!(!is_truthy(Some("")));
        assert!(!is_truthy(None));
    }
}
