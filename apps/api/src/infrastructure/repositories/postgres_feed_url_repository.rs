use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::feed_url::{FeedUrl, FeedUrlQuery};
use crate::domain::repositories::FeedUrlRepository;

const SELECT_FEED_URL: &str = r#"
    SELECT url, is_authority, podcast_id, created_at, updated_at
    FROM feed_urls
"#;

#[derive(sqlx::FromRow)]
struct FeedUrlRow {
    url: String,
    is_authority: bool,
    podcast_id: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<FeedUrlRow> for FeedUrl {
    fn from(r: FeedUrlRow) -> Self {
        FeedUrl {
            url: r.url,
            is_authority: r.is_authority,
            podcast: r.podcast_id,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// PostgreSQL implementation of FeedUrlRepository
pub struct PostgresFeedUrlRepository {
    pool: PgPool,
}

impl PostgresFeedUrlRepository {
    /// Creates a new PostgresFeedUrlRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FeedUrlRepository for PostgresFeedUrlRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<FeedUrl>, String> {
        let query = format!("{} WHERE url = $1", SELECT_FEED_URL);
        let row = sqlx::query_as::<_, FeedUrlRow>(&query)
            .bind(url)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find feed url: {}", e))?;

        Ok(row.map(FeedUrl::from))
    }

    async fn find_all(&self, query: &FeedUrlQuery) -> Result<Vec<FeedUrl>, String> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_FEED_URL);
        builder.push(" WHERE TRUE");

        if !query.podcast_ids.is_empty() {
            builder
                .push(" AND podcast_id = ANY(")
                .push_bind(query.podcast_ids.clone())
                .push(")");
        }
        if let Some(url) = &query.url {
            builder.push(" AND url = ").push_bind(url.clone());
        }
        if let Some(is_authority) = query.is_authority {
            builder.push(" AND is_authority = ").push_bind(is_authority);
        }

        builder.push(" ORDER BY created_at ASC, url ASC");
        if query.take > 0 {
            builder.push(" LIMIT ").push_bind(query.take);
        }
        if query.skip > 0 {
            builder.push(" OFFSET ").push_bind(query.skip);
        }

        let rows = builder
            .build_query_as::<FeedUrlRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| format!("Failed to list feed urls: {}", e))?;

        Ok(rows.into_iter().map(FeedUrl::from).collect())
    }

    async fn save(&self, feed_url: &FeedUrl) -> Result<(), String> {
        sqlx::query(
            r#"
            INSERT INTO feed_urls (url, is_authority, podcast_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (url) DO UPDATE SET
                is_authority = EXCLUDED.is_authority,
                podcast_id = EXCLUDED.podcast_id,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(&feed_url.url)
        .bind(feed_url.is_authority)
        .bind(feed_url.podcast)
        .bind(feed_url.created_at)
        .bind(feed_url.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| format!("Failed to save feed url: {}", e))?;

        Ok(())
    }

    async fn remove(&self, url: &str) -> Result<(), String> {
        let result = sqlx::query("DELETE FROM feed_urls WHERE url = $1")
            .bind(url)
            .execute(&self.pool)
            .await
            .map_err(|e| format!("Failed to delete feed url: {}", e))?;

        if result.rows_affected() == 0 {
            return Err(format!("FeedUrl not found: {}", url));
        }

        Ok(())
    }
}
