use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::DomainResult;
use crate::domain::serde_helpers::deserialize_some;
use crate::domain::validation::{is_url, Validate};

/// RSS feed location of a podcast
///
/// # Invariants
/// - `url` is the primary key and must be a valid http(s) URL
/// - `podcast` references the owning podcast, if any
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedUrl {
    pub url: String,
    pub is_authority: bool,
    pub podcast: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl FeedUrl {
    /// Creates an unsaved feed URL with column defaults
    ///
    /// # Example
    /// ```
    /// use podcast_api::domain::feed_url::FeedUrl;
    ///
    /// let feed_url = FeedUrl::new("https://example.com/feed.xml");
    /// assert!(!feed_url.is_authority);
    /// assert!(feed_url.podcast.is_none());
    /// ```
    pub fn new(url: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            url: url.into(),
            is_authority: false,
            podcast: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns the record identity (the URL)
    pub fn id(&self) -> &str {
        &self.url
    }

    /// Applies an update, returning the merged record
    ///
    /// `podcastId` from the update is moved onto the `podcast` relation:
    /// absent leaves the relation untouched, `null` clears it.
    pub fn merge(&self, update: &FeedUrlUpdate) -> FeedUrl {
        let mut merged = self.clone();

        if let Some(is_authority) = update.is_authority {
            merged.is_authority = is_authority;
        }

        if let Some(podcast_id) = update.podcast_id {
            merged.podcast = podcast_id;
        }

        merged.updated_at = Utc::now();
        merged
    }
}

impl Validate for FeedUrl {
    fn validate(&self) -> DomainResult<()> {
        is_url("url", &self.url)
    }
}

/// Partial update of a feed URL, addressed by `id` (the URL)
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedUrlUpdate {
    pub id: String,
    #[serde(default)]
    pub is_authority: Option<bool>,
    #[serde(default, deserialize_with = "deserialize_some")]
    pub podcast_id: Option<Option<Uuid>>,
}

/// Filters for listing feed URLs
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeedUrlQuery {
    pub podcast_ids: Vec<Uuid>,
    pub url: Option<String>,
    pub is_authority: Option<bool>,
    pub skip: i64,
    pub take: i64,
}
