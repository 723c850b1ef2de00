use axum::{
    extract::State,
    http::{header::SET_COOKIE, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::middleware::authenticate::{authenticate, cleared_auth_cookie};
use crate::api::middleware::query::is_truthy;
use crate::api::middleware::{ValidatedJson, ValidatedQuery};
use crate::api::state::AppState;
use crate::auth::password::verify_password;
use crate::domain::user::Email;

/// Request body for email/password login
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthParams {
    pub include_body_token: Option<String>,
}

/// Login with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    ValidatedQuery(params): ValidatedQuery<AuthParams>,
    ValidatedJson(req): ValidatedJson<LoginRequest>,
) -> Result<Response, ApiError> {
    let email = Email::new(&req.email).map_err(ApiError::bad_request)?;

    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid email or password"))?;

    let valid = verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::unauthorized("Invalid email or password"));
    }

    tracing::info!("User {} logged in", user.id);
    authenticate(
        &user,
        &state.config,
        is_truthy(params.include_body_token.as_deref()),
    )
}

/// Clear the auth cookie
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(SET_COOKIE, cleared_auth_cookie(&state.config))],
        Json(serde_json::json!({ "message": "Logged out" })),
    )
}

/// Health check endpoint
///
/// GET /health
pub async fn health_check() -> &'static str {
    "OK"
}
