use async_trait::async_trait;

use crate::domain::feed_url::{FeedUrl, FeedUrlQuery};

/// Repository trait for FeedUrl entities
///
/// Feed URLs are keyed by the URL string.
#[async_trait]
pub trait FeedUrlRepository: Send + Sync {
    /// Find a feed URL by its URL
    async fn find_by_url(&self, url: &str) -> Result<Option<FeedUrl>, String>;

    /// List feed URLs matching the query filters
    async fn find_all(&self, query: &FeedUrlQuery) -> Result<Vec<FeedUrl>, String>;

    /// Save a feed URL (insert or update by URL)
    async fn save(&self, feed_url: &FeedUrl) -> Result<(), String>;

    /// Remove a feed URL by its URL
    async fn remove(&self, url: &str) -> Result<(), String>;
}
