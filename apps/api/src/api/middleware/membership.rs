use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use chrono::Utc;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::JwtAuth;
use crate::api::state::AppState;
use crate::domain::user::User;

/// Authenticated user whose free trial or membership is still running
pub struct ActiveMember(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for ActiveMember
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let JwtAuth(user_id) = JwtAuth::from_request_parts(parts, state).await?;
        let state = AppState::from_ref(state);

        let user = state
            .users
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Unauthorized"))?;

        if !user.has_valid_membership(Utc::now()) {
            return Err(ApiError::unauthorized("Plus membership has expired"));
        }

        Ok(ActiveMember(user))
    }
}
