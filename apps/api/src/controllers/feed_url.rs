use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::feed_url::{FeedUrl, FeedUrlQuery, FeedUrlUpdate};
use crate::domain::repositories::FeedUrlRepository;
use crate::domain::validation::validate_or_throw;

fn not_found() -> DomainError {
    DomainError::NotFound("FeedUrl not found".to_string())
}

/// Ensures a row exists for every URL
///
/// Existing rows are returned as stored; missing ones are created as
/// authoritative. The result follows the input order.
pub async fn add_feed_urls(
    repo: &dyn FeedUrlRepository,
    urls: &[String],
) -> DomainResult<Vec<FeedUrl>> {
    let mut feeds = Vec::with_capacity(urls.len());

    for url in urls {
        let feed_url = match repo.find_by_url(url).await? {
            Some(existing) => existing,
            None => {
                let mut feed_url = FeedUrl::new(url.clone());
                feed_url.is_authority = true;
                validate_or_throw(&feed_url)?;
                repo.save(&feed_url).await?;
                tracing::info!("Created feed url {}", feed_url.url);
                feed_url
            }
        };

        feeds.push(feed_url);
    }

    Ok(feeds)
}

/// Removes a feed URL and returns the removed record
pub async fn delete_feed_url(repo: &dyn FeedUrlRepository, id: &str) -> DomainResult<FeedUrl> {
    let feed_url = repo.find_by_url(id).await?.ok_or_else(not_found)?;
    repo.remove(feed_url.id()).await?;
    Ok(feed_url)
}

pub async fn get_feed_url(repo: &dyn FeedUrlRepository, id: &str) -> DomainResult<FeedUrl> {
    repo.find_by_url(id).await?.ok_or_else(not_found)
}

pub async fn get_feed_urls(
    repo: &dyn FeedUrlRepository,
    query: &FeedUrlQuery,
) -> DomainResult<Vec<FeedUrl>> {
    Ok(repo.find_all(query).await?)
}

/// Merges an update into the stored record, validates and persists it
pub async fn update_feed_url(
    repo: &dyn FeedUrlRepository,
    update: &FeedUrlUpdate,
) -> DomainResult<FeedUrl> {
    let feed_url = repo.find_by_url(&update.id).await?.ok_or_else(not_found)?;

    let merged = feed_url.merge(update);
    validate_or_throw(&merged)?;
    repo.save(&merged).await?;

    Ok(merged)
}
