// Google Play purchase domain module

pub mod google_play_purchase;

pub use google_play_purchase::{GooglePlayPurchase, GooglePlayPurchaseUpdate, NewGooglePlayPurchase};
