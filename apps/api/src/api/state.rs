use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::domain::repositories::{
    FeedUrlRepository, GooglePlayPurchaseRepository, PodcastRepository, UserRepository,
};
use crate::infrastructure::repositories::{
    InMemoryFeedUrlRepository, InMemoryGooglePlayPurchaseRepository, InMemoryPodcastRepository,
    InMemoryUserRepository, PostgresFeedUrlRepository, PostgresGooglePlayPurchaseRepository,
    PostgresPodcastRepository, PostgresUserRepository,
};

/// Shared application state handed to every handler
///
/// Repositories are trait objects so handlers never name a database.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub feed_urls: Arc<dyn FeedUrlRepository>,
    pub podcasts: Arc<dyn PodcastRepository>,
    pub purchases: Arc<dyn GooglePlayPurchaseRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool
    pub fn postgres(pool: PgPool, config: Config) -> Self {
        Self {
            config: Arc::new(config),
            feed_urls: Arc::new(PostgresFeedUrlRepository::new(pool.clone())),
            podcasts: Arc::new(PostgresPodcastRepository::new(pool.clone())),
            purchases: Arc::new(PostgresGooglePlayPurchaseRepository::new(pool.clone())),
            users: Arc::new(PostgresUserRepository::new(pool)),
        }
    }

    /// State backed by empty in-memory repositories
    pub fn in_memory(config: Config) -> Self {
        Self {
            config: Arc::new(config),
            feed_urls: Arc::new(InMemoryFeedUrlRepository::new()),
            podcasts: Arc::new(InMemoryPodcastRepository::new()),
            purchases: Arc::new(InMemoryGooglePlayPurchaseRepository::new()),
            users: Arc::new(InMemoryUserRepository::new()),
        }
    }
}
