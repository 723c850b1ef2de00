use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use super::value_objects::Email;

/// Registered listener account
///
/// `history_items`, `playlists` and `queue_items` are opaque JSON documents
/// owned by the clients.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: Uuid,
    pub email: Email,
    pub email_verified: bool,
    pub password_hash: String,
    pub name: Option<String>,
    pub is_public: bool,
    pub free_trial_expiration: Option<DateTime<Utc>>,
    pub membership_expiration: Option<DateTime<Utc>>,
    pub history_items: Value,
    pub playlists: Value,
    pub queue_items: Value,
    pub subscribed_playlist_ids: Vec<Uuid>,
    pub subscribed_podcast_ids: Vec<Uuid>,
    pub subscribed_user_ids: Vec<Uuid>,
}

impl User {
    /// Creates an account with empty libraries and no membership
    pub fn new(email: Email, password_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            email_verified: false,
            password_hash,
            name: None,
            is_public: false,
            free_trial_expiration: None,
            membership_expiration: None,
            history_items: Value::Array(Vec::new()),
            playlists: Value::Array(Vec::new()),
            queue_items: Value::Array(Vec::new()),
            subscribed_playlist_ids: Vec::new(),
            subscribed_podcast_ids: Vec::new(),
            subscribed_user_ids: Vec::new(),
        }
    }

    /// True while either the free trial or the paid membership is running
    pub fn has_valid_membership(&self, now: DateTime<Utc>) -> bool {
        let active = |expiration: Option<DateTime<Utc>>| expiration.is_some_and(|e| e > now);
        active(self.free_trial_expiration) || active(self.membership_expiration)
    }

    /// Returns the subscription list with `podcast_id` toggled
    ///
    /// Subscribing appends; unsubscribing removes every occurrence.
    pub fn toggled_podcast_subscriptions(&self, podcast_id: Uuid) -> Vec<Uuid> {
        if self.subscribed_podcast_ids.contains(&podcast_id) {
            self.subscribed_podcast_ids
                .iter()
                .copied()
                .filter(|id| *id != podcast_id)
                .collect()
        } else {
            let mut ids = self.subscribed_podcast_ids.clone();
            ids.push(podcast_id);
            ids
        }
    }
}

/// Profile fields a client may see about the signed-in user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub email: String,
    pub email_verified: bool,
    pub free_trial_expiration: Option<DateTime<Utc>>,
    pub history_items: Value,
    pub id: Uuid,
    pub is_public: bool,
    pub membership_expiration: Option<DateTime<Utc>>,
    pub name: Option<String>,
    pub playlists: Value,
    pub queue_items: Value,
    pub subscribed_playlist_ids: Vec<Uuid>,
    pub subscribed_podcast_ids: Vec<Uuid>,
    pub subscribed_user_ids: Vec<Uuid>,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.to_string(),
            email_verified: user.email_verified,
            free_trial_expiration: user.free_trial_expiration,
            history_items: user.history_items.clone(),
            id: user.id,
            is_public: user.is_public,
            membership_expiration: user.membership_expiration,
            name: user.name.clone(),
            playlists: user.playlists.clone(),
            queue_items: user.queue_items.clone(),
            subscribed_playlist_ids: user.subscribed_playlist_ids.clone(),
            subscribed_podcast_ids: user.subscribed_podcast_ids.clone(),
            subscribed_user_ids: user.subscribed_user_ids.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn user() -> User {
        User::new(Email::new("listener@example.com").unwrap(), "hash".to_string())
    }

    #[test]
    fn no_membership_by_default() {
        assert!(!user().has_valid_membership(Utc::now()));
    }

    #[test]
    fn free_trial_counts_as_membership() {
        let now = Utc::now();
        let mut user = user();
        user.free_trial_expiration = Some(now + Duration::days(3));

        assert!(user.has_valid_membership(now));
    }

    #[test]
    fn expired_membership_rejected() {
        let now = Utc::now();
        let mut user = user();
        user.membership_expiration = Some(now - Duration::days(1));
        user.free_trial_expiration = Some(now - Duration::days(30));

        assert!(!user.has_valid_membership(now));
    }

    #[test]
    fn toggle_subscription_adds_then_removes() {
        let podcast_id = Uuid::new_v4();
        let mut user = user();

        user.subscribed_podcast_ids = user.toggled_podcast_subscriptions(podcast_id);
        assert_eq!(user.subscribed_podcast_ids, vec![podcast_id]);

        user.subscribed_podcast_ids = user.toggled_podcast_subscriptions(podcast_id);
        assert!(user.subscribed_podcast_ids.is_empty());
    }

    #[test]
    fn public_profile_omits_password_hash() {
        let user = user();
        let json = serde_json::to_value(PublicUser::from(&user)).unwrap();

        assert_eq!(json["email"], "listener@example.com");
        assert!(json.get("passwordHash").is_none());
        assert!(json.get("subscribedPodcastIds").unwrap().is_array());
    }
}
