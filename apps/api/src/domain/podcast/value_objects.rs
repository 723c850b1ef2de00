use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Result ordering for podcast searches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PodcastSort {
    /// By sortable title, A to Z
    Alphabetical,
    /// Newest episode first
    MostRecent,
    /// Most unique page views in the past week
    #[default]
    TopPastWeek,
}

impl FromStr for PodcastSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "alphabetical" => Ok(PodcastSort::Alphabetical),
            "most-recent" => Ok(PodcastSort::MostRecent),
            "top-past-week" => Ok(PodcastSort::TopPastWeek),
            other => Err(format!("Invalid sort: {}", other)),
        }
    }
}

impl fmt::Display for PodcastSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PodcastSort::Alphabetical => write!(f, "alphabetical"),
            PodcastSort::MostRecent => write!(f, "most-recent"),
            PodcastSort::TopPastWeek => write!(f, "top-past-week"),
        }
    }
}

/// Filters, ordering and paging for podcast searches
///
/// Empty lists mean "no filter".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PodcastQuery {
    pub podcast_ids: Vec<Uuid>,
    pub title: Option<String>,
    pub author_ids: Vec<Uuid>,
    pub category_ids: Vec<Uuid>,
    pub feed_urls: Vec<String>,
    pub sort: PodcastSort,
    pub skip: i64,
    pub take: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_round_trips_through_display() {
        for sort in [
            PodcastSort::Alphabetical,
            PodcastSort::MostRecent,
            PodcastSort::TopPastWeek,
        ] {
            assert_eq!(sort.to_string().parse::<PodcastSort>(), Ok(sort));
        }
    }

    #[test]
    fn unknown_sort_rejected() {
        assert!("random".parse::<PodcastSort>().is_err());
    }

    #[test]
    fn default_sort_is_top_past_week() {
        assert_eq!(PodcastSort::default(), PodcastSort::TopPastWeek);
    }
}
