// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod errors;
pub mod feed_url;
pub mod podcast;
pub mod purchase;
pub mod repositories;
pub mod serde_helpers;
pub mod user;
pub mod validation;
