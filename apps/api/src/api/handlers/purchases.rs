use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::api::errors::ApiError;
use crate::api::middleware::{JwtAuth, OptionalJwtAuth, ValidatedJson};
use crate::api::state::AppState;
use crate::controllers::google_play_purchase::{
    create_google_play_purchase, get_google_play_purchase, update_google_play_purchase,
};
use crate::domain::purchase::{GooglePlayPurchase, GooglePlayPurchaseUpdate, NewGooglePlayPurchase};

/// Get the caller's purchase by order id; `null` when no such order
///
/// GET /google-play/purchase/:orderId
pub async fn get_purchase(
    State(state): State<AppState>,
    OptionalJwtAuth(user_id): OptionalJwtAuth,
    Path(order_id): Path<String>,
) -> Result<Json<Option<GooglePlayPurchase>>, ApiError> {
    let purchase = get_google_play_purchase(state.purchases.as_ref(), &order_id, user_id).await?;
    Ok(Json(purchase))
}

/// Record a purchase owned by the caller
///
/// POST /google-play/purchase
pub async fn create_purchase(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    ValidatedJson(input): ValidatedJson<NewGooglePlayPurchase>,
) -> Result<(StatusCode, Json<GooglePlayPurchase>), ApiError> {
    let purchase =
        create_google_play_purchase(state.purchases.as_ref(), input, Some(user_id)).await?;
    Ok((StatusCode::CREATED, Json(purchase)))
}

/// Update one of the caller's purchases
///
/// PUT /google-play/purchase
pub async fn update_purchase(
    State(state): State<AppState>,
    JwtAuth(user_id): JwtAuth,
    ValidatedJson(update): ValidatedJson<GooglePlayPurchaseUpdate>,
) -> Result<Json<GooglePlayPurchase>, ApiError> {
    let purchase =
        update_google_play_purchase(state.purchases.as_ref(), &update, Some(user_id)).await?;
    Ok(Json(purchase))
}
