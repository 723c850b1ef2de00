use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::repositories::UserRepository;
use crate::domain::user::{Email, User};

const SELECT_USER: &str = r#"
    SELECT
        id, email, email_verified, password_hash, name, is_public,
        free_trial_expiration, membership_expiration,
        history_items, playlists, queue_items,
        subscribed_playlist_ids, subscribed_podcast_ids, subscribed_user_ids
    FROM users
"#;

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    email: String,
    email_verified: bool,
    password_hash: String,
    name: Option<String>,
    is_public: bool,
    free_trial_expiration: Option<DateTime<Utc>>,
    membership_expiration: Option<DateTime<Utc>>,
    history_items: Value,
    playlists: Value,
    queue_items: Value,
    subscribed_playlist_ids: Vec<Uuid>,
    subscribed_podcast_ids: Vec<Uuid>,
    subscribed_user_ids: Vec<Uuid>,
}

impl TryFrom<UserRow> for User {
    type Error = String;

    fn try_from(r: UserRow) -> Result<Self, Self::Error> {
        let email = Email::new(&r.email)
            .map_err(|e| format!("Invalid email from database: {}", e))?;

        Ok(User {
            id: r.id,
            email,
            email_verified: r.email_verified,
            password_hash: r.password_hash,
            name: r.name,
            is_public: r.is_public,
            free_trial_expiration: r.free_trial_expiration,
            membership_expiration: r.membership_expiration,
            history_items: r.history_items,
            playlists: r.playlists,
            queue_items: r.queue_items,
            subscribed_playlist_ids: r.subscribed_playlist_ids,
            subscribed_podcast_ids: r.subscribed_podcast_ids,
            subscribed_user_ids: r.subscribed_user_ids,
        })
    }
}

/// PostgreSQL implementation of UserRepository
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a new PostgresUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, String> {
        sqlx::query(
            r#"
            INSERT INTO users (
                id, email, email_verified, password_hash, name, is_public,
                free_trial_expiration, membership_expiration,
                history_items, playlists, queue_items,
                subscribed_playlist_ids, subscribed_podcast_ids, subscribed_user_ids
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            "#,
        )
        .bind(user.id)
        .bind(user.email.as_str())
        .bind(user.email_verified)
        .bind(&user.password_hash)
        .bind(&user.name)
        .bind(user.is_public)
        .bind(user.free_trial_expiration)
        .bind(user.membership_expiration)
        .bind(&user.history_items)
        .bind(&user.playlists)
        .bind(&user.queue_items)
        .bind(&user.subscribed_playlist_ids)
        .bind(&user.subscribed_podcast_ids)
        .bind(&user.subscribed_user_ids)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to create user: {}", e))?;

        Ok(user.id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        let query = format!("{} WHERE id = $1", SELECT_USER);
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find user by id: {}", e))?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, String> {
        let query = format!("{} WHERE email = $1", SELECT_USER);
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find user by email: {}", e))?;

        row.map(User::try_from).transpose()
    }

    async fn update_subscribed_podcast_ids(
        &self,
        user_id: Uuid,
        podcast_ids: &[Uuid],
    ) -> Result<(), String> {
        let result = sqlx::query(
            r#"
            UPDATE users
            SET subscribed_podcast_ids = $1, updated_at = NOW()
            WHERE id = $2
            "#,
        )
        .bind(podcast_ids)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to update subscribed podcasts: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("User not found: {}", user_id));
        }

        Ok(())
    }
}
