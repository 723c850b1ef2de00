use uuid::Uuid;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::purchase::{GooglePlayPurchase, GooglePlayPurchaseUpdate, NewGooglePlayPurchase};
use crate::domain::repositories::GooglePlayPurchaseRepository;
use crate::domain::validation::validate_or_throw;

pub async fn create_google_play_purchase(
    repo: &dyn GooglePlayPurchaseRepository,
    input: NewGooglePlayPurchase,
    owner: Option<Uuid>,
) -> DomainResult<GooglePlayPurchase> {
    let purchase = GooglePlayPurchase::new(input, owner);
    validate_or_throw(&purchase)?;

    if !repo.create(&purchase).await? {
        return Err(DomainError::BadRequest(format!(
            "GooglePlayPurchase with orderId {} already exists",
            purchase.order_id
        )));
    }

    Ok(purchase)
}

/// Looks up a purchase for its owner
///
/// # Returns
/// * `Ok(None)` - No purchase with this order id
/// * `Err(Unauthorized)` - No caller, or the caller does not own the purchase
pub async fn get_google_play_purchase(
    repo: &dyn GooglePlayPurchaseRepository,
    order_id: &str,
    logged_in_user_id: Option<Uuid>,
) -> DomainResult<Option<GooglePlayPurchase>> {
    let Some(user_id) = logged_in_user_id else {
        return Err(DomainError::Unauthorized(
            "Login to get Google Play purchase by order id".to_string(),
        ));
    };

    let Some(purchase) = repo.find_by_order_id(order_id).await? else {
        return Ok(None);
    };

    if purchase.is_owned_by(user_id) {
        Ok(Some(purchase))
    } else {
        Err(DomainError::Unauthorized(
            "You don't have permission to get this Google Play purchase by id".to_string(),
        ))
    }
}

/// Merges an update into a purchase owned by the caller
///
/// Ownerless purchases may be updated by any caller.
pub async fn update_google_play_purchase(
    repo: &dyn GooglePlayPurchaseRepository,
    update: &GooglePlayPurchaseUpdate,
    logged_in_user_id: Option<Uuid>,
) -> DomainResult<GooglePlayPurchase> {
    let purchase = repo
        .find_by_order_id(&update.order_id)
        .await?
        .ok_or_else(|| DomainError::NotFound("GooglePlayPurchase not found".to_string()))?;

    if purchase.owner.is_some() && purchase.owner != logged_in_user_id {
        return Err(DomainError::Unauthorized("Unauthorized".to_string()));
    }

    let merged = purchase.merge(update);
    validate_or_throw(&merged)?;
    repo.save(&merged).await?;

    Ok(merged)
}
