use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::podcast::{Podcast, PodcastMetadata, PodcastQuery};
use crate::domain::repositories::{PodcastRepository, UserRepository};

pub async fn get_podcast(repo: &dyn PodcastRepository, id: Uuid) -> DomainResult<Podcast> {
    repo.find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Podcast not found".to_string()))
}

pub async fn get_podcasts(
    repo: &dyn PodcastRepository,
    query: &PodcastQuery,
    include_nsfw: bool,
) -> DomainResult<Vec<Podcast>> {
    Ok(repo.search(query, include_nsfw).await?)
}

/// Latest-episode metadata for the requested podcasts
///
/// Without podcast ids there is nothing to report.
pub async fn get_metadata(
    repo: &dyn PodcastRepository,
    query: &PodcastQuery,
) -> DomainResult<Vec<PodcastMetadata>> {
    if query.podcast_ids.is_empty() {
        return Ok(Vec::new());
    }

    let podcasts = repo.search(query, true).await?;
    Ok(podcasts.iter().map(PodcastMetadata::from).collect())
}

/// Subscribes the user to the podcast, or unsubscribes if already subscribed
///
/// Returns the user's updated subscription list.
pub async fn toggle_subscribe_to_podcast(
    users: &dyn UserRepository,
    podcast_id: Uuid,
    user_id: Uuid,
) -> DomainResult<Vec<Uuid>> {
    let user = users
        .find_by_id(user_id)
        .await?
        .ok_or_else(|| DomainError::NotFound("User not found".to_string()))?;

    let subscribed_podcast_ids = user.toggled_podcast_subscriptions(podcast_id);
    users
        .update_subscribed_podcast_ids(user.id, &subscribed_podcast_ids)
        .await?;

    tracing::debug!(
        "User {} now subscribed to {} podcasts",
        user.id,
        subscribed_podcast_ids.len()
    );

    Ok(subscribed_podcast_ids)
}
