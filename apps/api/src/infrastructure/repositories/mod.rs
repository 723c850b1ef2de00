// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod memory;
pub mod postgres_feed_url_repository;
pub mod postgres_google_play_purchase_repository;
pub mod postgres_podcast_repository;
pub mod postgres_user_repository;

pub use memory::{
    InMemoryFeedUrlRepository, InMemoryGooglePlayPurchaseRepository, InMemoryPodcastRepository,
    InMemoryUserRepository,
};
pub use postgres_feed_url_repository::PostgresFeedUrlRepository;
pub use postgres_google_play_purchase_repository::PostgresGooglePlayPurchaseRepository;
pub use postgres_podcast_repository::PostgresPodcastRepository;
pub use postgres_user_repository::PostgresUserRepository;
