// Repository interfaces (ports)
// Controllers depend on these traits, never on a concrete database

pub mod feed_url_repository;
pub mod google_play_purchase_repository;
pub mod podcast_repository;
pub mod user_repository;

pub use feed_url_repository::FeedUrlRepository;
pub use google_play_purchase_repository::GooglePlayPurchaseRepository;
pub use podcast_repository::PodcastRepository;
pub use user_repository::UserRepository;
