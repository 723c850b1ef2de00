use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{Delimited, PageOptions, PageResource, ValidatedQuery};
use crate::api::state::AppState;
use crate::controllers::feed_url::{get_feed_url, get_feed_urls};
use crate::domain::feed_url::{FeedUrl, FeedUrlQuery};

/// Accepted query params for feed URL search
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct FeedUrlSearchParams {
    pub page: Option<i64>,
    pub sort: Option<String>,
    pub podcast_id: Option<Delimited<Uuid>>,
    pub url: Option<String>,
    pub is_authority: Option<bool>,
}

/// Search feed URLs
///
/// GET /feedUrl
pub async fn search_feed_urls(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<FeedUrlSearchParams>,
) -> Result<Json<Vec<FeedUrl>>, ApiError> {
    let page = PageOptions::parse(params.page, params.sort, PageResource::FeedUrls)?;

    let query = FeedUrlQuery {
        podcast_ids: params.podcast_id.unwrap_or_default().into_inner(),
        url: params.url,
        is_authority: params.is_authority,
        skip: page.skip,
        take: page.take,
    };

    let feed_urls = get_feed_urls(state.feed_urls.as_ref(), &query).await?;
    Ok(Json(feed_urls))
}

/// Get a feed URL; the id is the (percent-encoded) URL
///
/// GET /feedUrl/:id
pub async fn get_feed_url_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<FeedUrl>, ApiError> {
    let feed_url = get_feed_url(state.feed_urls.as_ref(), &id).await?;
    Ok(Json(feed_url))
}
