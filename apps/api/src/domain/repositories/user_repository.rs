use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::user::{Email, User};

/// Repository trait for User accounts
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Create a new user
    async fn create(&self, user: User) -> Result<Uuid, String>;

    /// Find a user by ID
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String>;

    /// Find a user by email address
    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, String>;

    /// Replace the user's podcast subscriptions
    async fn update_subscribed_podcast_ids(
        &self,
        user_id: Uuid,
        podcast_ids: &[Uuid],
    ) -> Result<(), String>;
}
