// Application controllers
// One module per entity; each function receives the repository it needs

pub mod feed_url;
pub mod google_play_purchase;
pub mod podcast;
