// Podcast domain module
// Contains the podcast aggregate root and search value objects

#![allow(clippy::module_inception)]

pub mod podcast;
pub mod value_objects;

pub use podcast::{Podcast, PodcastMetadata};
pub use value_objects::{PodcastQuery, PodcastSort};
