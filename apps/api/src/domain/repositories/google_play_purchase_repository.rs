use async_trait::async_trait;

use crate::domain::purchase::GooglePlayPurchase;

/// Repository trait for Google Play purchases, keyed by order id
#[async_trait]
pub trait GooglePlayPurchaseRepository: Send + Sync {
    /// Find a purchase by order id
    async fn find_by_order_id(&self, order_id: &str)
        -> Result<Option<GooglePlayPurchase>, String>;

    /// Insert a new purchase
    ///
    /// Returns `false` without touching the stored row when the order id
    /// already exists.
    async fn create(&self, purchase: &GooglePlayPurchase) -> Result<bool, String>;

    /// Save a purchase (insert or update by order id); never changes the owner
    async fn save(&self, purchase: &GooglePlayPurchase) -> Result<(), String>;
}
