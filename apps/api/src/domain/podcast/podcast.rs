use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Podcast aggregate root
///
/// Owns its feed URLs and references authors and categories by id.
/// `is_explicit` marks NSFW content, hidden unless a client opts in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Podcast {
    pub id: Uuid,
    pub title: Option<String>,
    pub sortable_title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub is_explicit: bool,
    pub is_public: bool,
    pub last_episode_pub_date: Option<DateTime<Utc>>,
    pub last_episode_title: Option<String>,
    pub past_week_total_unique_page_views: i64,
    pub author_ids: Vec<Uuid>,
    pub category_ids: Vec<Uuid>,
    pub feed_urls: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Podcast {
    /// Creates a public, non-explicit podcast with the given title
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        let title = title.into();
        Self {
            id: Uuid::new_v4(),
            sortable_title: Some(sortable_title(&title)),
            title: Some(title),
            description: None,
            image_url: None,
            is_explicit: false,
            is_public: true,
            last_episode_pub_date: None,
            last_episode_title: None,
            past_week_total_unique_page_views: 0,
            author_ids: Vec::new(),
            category_ids: Vec::new(),
            feed_urls: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

/// Lowercased title without a leading article, used for alphabetical sort
pub fn sortable_title(title: &str) -> String {
    let lowered = title.trim().to_lowercase();
    for article in ["the ", "a ", "an "] {
        if let Some(rest) = lowered.strip_prefix(article) {
            return rest.trim_start().to_string();
        }
    }
    lowered
}

/// Latest-episode snapshot clients poll to detect new episodes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PodcastMetadata {
    pub id: Uuid,
    pub title: Option<String>,
    pub last_episode_pub_date: Option<DateTime<Utc>>,
    pub last_episode_title: Option<String>,
    pub feed_urls: Vec<String>,
}

impl From<&Podcast> for PodcastMetadata {
    fn from(podcast: &Podcast) -> Self {
        Self {
            id: podcast.id,
            title: podcast.title.clone(),
            last_episode_pub_date: podcast.last_episode_pub_date,
            last_episode_title: podcast.last_episode_title.clone(),
            feed_urls: podcast.feed_urls.clone(),
        }
    }
}
