// Feed URL domain module
// A feed URL is identified by the URL itself

#![allow(clippy::module_inception)]

pub mod feed_url;

pub use feed_url::{FeedUrl, FeedUrlQuery, FeedUrlUpdate};
