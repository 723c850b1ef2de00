use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::domain::podcast::{Podcast, PodcastQuery, PodcastSort};
use crate::domain::repositories::PodcastRepository;

/// Feed URLs are gathered from the feed_urls table per podcast
const SELECT_PODCAST: &str = r#"
    SELECT
        p.id, p.title, p.sortable_title, p.description, p.image_url,
        p.is_explicit, p.is_public,
        p.last_episode_pub_date, p.last_episode_title,
        p.past_week_total_unique_page_views,
        p.author_ids, p.category_ids,
        ARRAY(
            SELECT f.url FROM feed_urls f WHERE f.podcast_id = p.id ORDER BY f.url
        ) AS feed_urls,
        p.created_at, p.updated_at
    FROM podcasts p
"#;

#[derive(sqlx::FromRow)]
struct PodcastRow {
    id: Uuid,
    title: Option<String>,
    sortable_title: Option<String>,
    description: Option<String>,
    image_url: Option<String>,
    is_explicit: bool,
    is_public: bool,
    last_episode_pub_date: Option<DateTime<Utc>>,
    last_episode_title: Option<String>,
    past_week_total_unique_page_views: i64,
    author_ids: Vec<Uuid>,
    category_ids: Vec<Uuid>,
    feed_urls: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<PodcastRow> for Podcast {
    fn from(r: PodcastRow) -> Self {
        Podcast {
            id: r.id,
            title: r.title,
            sortable_title: r.sortable_title,
            description: r.description,
            image_url: r.image_url,
            is_explicit: r.is_explicit,
            is_public: r.is_public,
            last_episode_pub_date: r.last_episode_pub_date,
            last_episode_title: r.last_episode_title,
            past_week_total_unique_page_views: r.past_week_total_unique_page_views,
            author_ids: r.author_ids,
            category_ids: r.category_ids,
            feed_urls: r.feed_urls,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Escapes LIKE wildcards so the title matches literally
fn escape_like(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// PostgreSQL implementation of PodcastRepository
pub struct PostgresPodcastRepository {
    pool: PgPool,
}

impl PostgresPodcastRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PodcastRepository for PostgresPodcastRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Podcast>, String> {
        let query = format!("{} WHERE p.id = $1", SELECT_PODCAST);
        let row = sqlx::query_as::<_, PodcastRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| format!("Failed to find podcast by id: {}", e))?;

        Ok(row.map(Podcast::from))
    }

    async fn search(
        &self,
        query: &PodcastQuery,
        include_nsfw: bool,
    ) -> Result<Vec<Podcast>, String> {
        let mut builder = QueryBuilder::<Postgres>::new(SELECT_PODCAST);
        builder.push(" WHERE p.is_public = TRUE");

        if !include_nsfw {
            builder.push(" AND p.is_explicit = FALSE");
        }
        if !query.podcast_ids.is_empty() {
            builder
                .push(" AND p.id = ANY(")
                .push_bind(query.podcast_ids.clone())
                .push(")");
        }
        if let Some(title) = &query.title {
            builder
                .push(" AND p.title ILIKE ")
                .push_bind(format!("%{}%", escape_like(title)))
                .push(" ESCAPE '\\'");
        }
        if !query.author_ids.is_empty() {
            builder
                .push(" AND p.author_ids && ")
                .push_bind(query.author_ids.clone());
        }
        if !query.category_ids.is_empty() {
            builder
                .push(" AND p.category_ids && ")
                .push_bind(query.category_ids.clone());
        }
        if !query.feed_urls.is_empty() {
            builder
                .push(" AND EXISTS (SELECT 1 FROM feed_urls f WHERE f.podcast_id = p.id AND f.url = ANY(")
                .push_bind(query.feed_urls.clone())
                .push("))");
        }

        builder.push(match query.sort {
            PodcastSort::Alphabetical => " ORDER BY p.sortable_title ASC NULLS LAST",
            PodcastSort::MostRecent => " ORDER BY p.last_episode_pub_date DESC NULLS LAST",
            PodcastSort::TopPastWeek => " ORDER BY p.past_week_total_unique_page_views DESC",
        });
        builder.push(", p.id ASC");

        if query.take > 0 {
            builder.push(" LIMIT ").push_bind(query.take);
        }
        if query.skip > 0 {
            builder.push(" OFFSET ").push_bind(query.skip);
        }

        let rows = builder
            .build_query_as::<PodcastRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| format!("Failed to search podcasts: {}", e))?;

        Ok(rows.into_iter().map(Podcast::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_quotes_wildcards() {
        assert_eq!(escape_like("100%"), "100\\%");
        assert_eq!(escape_like("snake_case"), "snake\\_case");
        assert_eq!(escape_like(r"back\slash"), r"back\\slash");
        assert_eq!(escape_like("Plain Title"), "Plain Title");
    }
}
