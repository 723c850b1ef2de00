use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::middleware::{
    ActiveMember, Delimited, IncludeNsfw, PageOptions, PageResource, ValidatedQuery,
};
use crate::api::state::AppState;
use crate::controllers::podcast::{
    get_metadata, get_podcast, get_podcasts, toggle_subscribe_to_podcast,
};
use crate::domain::podcast::{Podcast, PodcastMetadata, PodcastQuery, PodcastSort};

/// Accepted query params for podcast search and metadata
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
pub struct PodcastSearchParams {
    pub page: Option<i64>,
    pub sort: Option<String>,
    pub podcast_id: Option<Delimited<Uuid>>,
    pub title: Option<String>,
    pub authors: Option<Delimited<Uuid>>,
    pub categories: Option<Delimited<Uuid>>,
    pub feed_urls: Option<Delimited<String>>,
}

impl PodcastSearchParams {
    fn into_query(self) -> Result<PodcastQuery, ApiError> {
        let page = PageOptions::parse(self.page, self.sort, PageResource::Podcasts)?;
        let sort = match page.sort.as_deref() {
            Some(sort) => sort.parse::<PodcastSort>().map_err(ApiError::bad_request)?,
            None => PodcastSort::default(),
        };

        Ok(PodcastQuery {
            podcast_ids: self.podcast_id.unwrap_or_default().into_inner(),
            title: self.title.filter(|t| !t.trim().is_empty()),
            author_ids: self.authors.unwrap_or_default().into_inner(),
            category_ids: self.categories.unwrap_or_default().into_inner(),
            feed_urls: self.feed_urls.unwrap_or_default().into_inner(),
            sort,
            skip: page.skip,
            take: page.take,
        })
    }
}

fn parse_podcast_id(id: &str) -> Option<Uuid> {
    Uuid::parse_str(id).ok()
}

/// Latest-episode metadata for a set of podcasts
///
/// GET /podcast/metadata
pub async fn podcast_metadata(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<PodcastSearchParams>,
) -> Result<Json<Vec<PodcastMetadata>>, ApiError> {
    let query = params.into_query()?;
    let metadata = get_metadata(state.podcasts.as_ref(), &query).await?;
    Ok(Json(metadata))
}

/// Search podcasts
///
/// GET /podcast
pub async fn search_podcasts(
    State(state): State<AppState>,
    IncludeNsfw(include_nsfw): IncludeNsfw,
    ValidatedQuery(params): ValidatedQuery<PodcastSearchParams>,
) -> Result<Json<Vec<Podcast>>, ApiError> {
    let query = params.into_query()?;
    let podcasts = get_podcasts(state.podcasts.as_ref(), &query, include_nsfw).await?;
    Ok(Json(podcasts))
}

/// Get a podcast by ID
///
/// GET /podcast/:id
pub async fn get_podcast_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Podcast>, ApiError> {
    let id = parse_podcast_id(&id).ok_or_else(|| ApiError::not_found("Podcast not found"))?;
    let podcast = get_podcast(state.podcasts.as_ref(), id).await?;
    Ok(Json(podcast))
}

/// Subscribe to or unsubscribe from a podcast
///
/// GET /podcast/toggle-subscribe/:id
pub async fn toggle_subscribe(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ActiveMember(user): ActiveMember,
) -> Result<Json<Vec<Uuid>>, ApiError> {
    let podcast_id =
        parse_podcast_id(&id).ok_or_else(|| ApiError::bad_request("Invalid podcast id"))?;

    let subscribed_podcast_ids =
        toggle_subscribe_to_podcast(state.users.as_ref(), podcast_id, user.id).await?;
    Ok(Json(subscribed_podcast_ids))
}
