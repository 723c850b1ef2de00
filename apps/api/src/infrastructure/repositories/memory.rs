// In-memory repository implementations
// Back the HTTP tests and local runs without PostgreSQL

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::feed_url::{FeedUrl, FeedUrlQuery};
use crate::domain::podcast::{Podcast, PodcastQuery, PodcastSort};
use crate::domain::purchase::GooglePlayPurchase;
use crate::domain::repositories::{
    FeedUrlRepository, GooglePlayPurchaseRepository, PodcastRepository, UserRepository,
};
use crate::domain::user::{Email, User};

fn any_of(wanted: &[Uuid], have: &[Uuid]) -> bool {
    wanted.is_empty() || wanted.iter().any(|id| have.contains(id))
}

fn page<T>(items: Vec<T>, skip: i64, take: i64) -> Vec<T> {
    let skip = usize::try_from(skip).unwrap_or(0);
    let take = if take > 0 {
        usize::try_from(take).unwrap_or(usize::MAX)
    } else {
        usize::MAX
    };
    items.into_iter().skip(skip).take(take).collect()
}

/// Feed URLs kept in insertion order
#[derive(Default)]
pub struct InMemoryFeedUrlRepository {
    rows: RwLock<Vec<FeedUrl>>,
}

impl InMemoryFeedUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored rows
    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

#[async_trait]
impl FeedUrlRepository for InMemoryFeedUrlRepository {
    async fn find_by_url(&self, url: &str) -> Result<Option<FeedUrl>, String> {
        Ok(self.rows.read().await.iter().find(|f| f.url == url).cloned())
    }

    async fn find_all(&self, query: &FeedUrlQuery) -> Result<Vec<FeedUrl>, String> {
        let rows = self.rows.read().await;
        let matches = rows
            .iter()
            .filter(|f| {
                query.podcast_ids.is_empty()
                    || f.podcast.is_some_and(|id| query.podcast_ids.contains(&id))
            })
            .filter(|f| query.url.as_ref().map_or(true, |url| &f.url == url))
            .filter(|f| query.is_authority.map_or(true, |a| f.is_authority == a))
            .cloned()
            .collect();

        Ok(page(matches, query.skip, query.take))
    }

    async fn save(&self, feed_url: &FeedUrl) -> Result<(), String> {
        let mut rows = self.rows.write().await;
        match rows.iter_mut().find(|f| f.url == feed_url.url) {
            Some(existing) => {
                let created_at = existing.created_at;
                *existing = feed_url.clone();
                existing.created_at = created_at;
            }
            None => rows.push(feed_url.clone()),
        }
        Ok(())
    }

    async fn remove(&self, url: &str) -> Result<(), String> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|f| f.url != url);

        if rows.len() == before {
            return Err(format!("FeedUrl not found: {}", url));
        }
        Ok(())
    }
}

/// Google Play purchases keyed by order id
#[derive(Default)]
pub struct InMemoryGooglePlayPurchaseRepository {
    rows: RwLock<HashMap<String, GooglePlayPurchase>>,
}

impl InMemoryGooglePlayPurchaseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GooglePlayPurchaseRepository for InMemoryGooglePlayPurchaseRepository {
    async fn find_by_order_id(
        &self,
        order_id: &str,
    ) -> Result<Option<GooglePlayPurchase>, String> {
        Ok(self.rows.read().await.get(order_id).cloned())
    }

    async fn create(&self, purchase: &GooglePlayPurchase) -> Result<bool, String> {
        let mut rows = self.rows.write().await;
        if rows.contains_key(&purchase.order_id) {
            return Ok(false);
        }
        rows.insert(purchase.order_id.clone(), purchase.clone());
        Ok(true)
    }

    async fn save(&self, purchase: &GooglePlayPurchase) -> Result<(), String> {
        let mut rows = self.rows.write().await;
        let mut stored = purchase.clone();
        if let Some(existing) = rows.get(&purchase.order_id) {
            stored.owner = existing.owner;
            stored.created_at = existing.created_at;
        }
        rows.insert(stored.order_id.clone(), stored);
        Ok(())
    }
}

/// Podcasts seeded up front; read-only through the trait
#[derive(Default)]
pub struct InMemoryPodcastRepository {
    rows: RwLock<Vec<Podcast>>,
}

impl InMemoryPodcastRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_podcasts(podcasts: Vec<Podcast>) -> Self {
        Self {
            rows: RwLock::new(podcasts),
        }
    }
}

#[async_trait]
impl PodcastRepository for InMemoryPodcastRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Podcast>, String> {
        Ok(self.rows.read().await.iter().find(|p| p.id == id).cloned())
    }

    async fn search(
        &self,
        query: &PodcastQuery,
        include_nsfw: bool,
    ) -> Result<Vec<Podcast>, String> {
        let title = query.title.as_ref().map(|t| t.to_lowercase());

        let mut matches: Vec<Podcast> = self
            .rows
            .read()
            .await
            .iter()
            .filter(|p| p.is_public && (include_nsfw || !p.is_explicit))
            .filter(|p| query.podcast_ids.is_empty() || query.podcast_ids.contains(&p.id))
            .filter(|p| {
                title.as_ref().map_or(true, |t| {
                    p.title
                        .as_ref()
                        .is_some_and(|pt| pt.to_lowercase().contains(t.as_str()))
                })
            })
            .filter(|p| any_of(&query.author_ids, &p.author_ids))
            .filter(|p| any_of(&query.category_ids, &p.category_ids))
            .filter(|p| {
                query.feed_urls.is_empty()
                    || query.feed_urls.iter().any(|url| p.feed_urls.contains(url))
            })
            .cloned()
            .collect();

        match query.sort {
            PodcastSort::Alphabetical => {
                matches.sort_by(|a, b| a.sortable_title.cmp(&b.sortable_title))
            }
            PodcastSort::MostRecent => {
                matches.sort_by(|a, b| b.last_episode_pub_date.cmp(&a.last_episode_pub_date))
            }
            PodcastSort::TopPastWeek => matches.sort_by(|a, b| {
                b.past_week_total_unique_page_views
                    .cmp(&a.past_week_total_unique_page_views)
            }),
        }

        Ok(page(matches, query.skip, query.take))
    }
}

/// User accounts keyed by id
#[derive(Default)]
pub struct InMemoryUserRepository {
    rows: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<Uuid, String> {
        let mut rows = self.rows.write().await;
        if rows.values().any(|u| u.email == user.email) {
            return Err(format!(
                "Failed to create user: duplicate email {}",
                user.email
            ));
        }

        let id = user.id;
        rows.insert(id, user);
        Ok(id)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, String> {
        Ok(self.rows.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<User>, String> {
        Ok(self
            .rows
            .read()
            .await
            .values()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn update_subscribed_podcast_ids(
        &self,
        user_id: Uuid,
        podcast_ids: &[Uuid],
    ) -> Result<(), String> {
        let mut rows = self.rows.write().await;
        let user = rows
            .get_mut(&user_id)
            .ok_or_else(|| format!("User not found: {}", user_id))?;
        user.subscribed_podcast_ids = podcast_ids.to_vec();
        Ok(())
    }
}
