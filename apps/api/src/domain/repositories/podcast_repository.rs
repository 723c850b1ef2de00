use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::podcast::{Podcast, PodcastQuery};

/// Repository trait for the Podcast aggregate
#[async_trait]
pub trait PodcastRepository: Send + Sync {
    /// Find a podcast by its ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Podcast>, String>;

    /// Search public podcasts
    ///
    /// Explicit podcasts are only returned when `include_nsfw` is set.
    async fn search(&self, query: &PodcastQuery, include_nsfw: bool)
        -> Result<Vec<Podcast>, String>;
}
