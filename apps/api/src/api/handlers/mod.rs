// HTTP handlers: extract, call a controller, serialize the result

pub mod auth;
pub mod feed_urls;
pub mod podcasts;
pub mod purchases;
