use axum::{
    http::{header::SET_COOKIE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::errors::ApiError;
use crate::api::middleware::auth::AUTH_COOKIE_NAME;
use crate::auth::jwt::{auth_expires, create_token};
use crate::config::Config;
use crate::domain::user::{PublicUser, User};

/// Login response body: the public profile, plus the token when requested
#[derive(Debug, Serialize)]
pub struct AuthenticatedUser {
    #[serde(flatten)]
    pub user: PublicUser,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn http_date(at: DateTime<Utc>) -> String {
    at.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}

/// `Set-Cookie` value carrying the bearer token
pub fn auth_cookie(bearer: &str, expires: DateTime<Utc>, config: &Config) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; Expires={}; HttpOnly",
        AUTH_COOKIE_NAME,
        bearer.replace(' ', "%20"),
        http_date(expires)
    );
    if let Some(domain) = &config.cookie_domain {
        cookie.push_str(&format!("; Domain={}", domain));
    }
    if config.cookie_is_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that expires the auth cookie immediately
pub fn cleared_auth_cookie(config: &Config) -> String {
    let mut cookie = format!(
        "{}=; Path=/; Expires=Thu, 01 Jan 1970 00:00:00 GMT; Max-Age=0; HttpOnly",
        AUTH_COOKIE_NAME
    );
    if let Some(domain) = &config.cookie_domain {
        cookie.push_str(&format!("; Domain={}", domain));
    }
    if config.cookie_is_secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// Issues a bearer token for an authenticated user
///
/// The token goes into the response body when `include_body_token` is set,
/// otherwise into an HTTP-only cookie. Fails with 500 when no token can be
/// generated.
pub fn authenticate(
    user: &User,
    config: &Config,
    include_body_token: bool,
) -> Result<Response, ApiError> {
    let expires = auth_expires(config.auth_expires_days);
    let token = create_token(user.id, &config.jwt_secret, expires).map_err(|e| {
        ApiError::internal_server_error(format!("Failed to generate token: {}", e))
    })?;
    let bearer = format!("Bearer {}", token);

    let mut body = AuthenticatedUser {
        user: PublicUser::from(user),
        token: None,
    };

    if include_body_token {
        body.token = Some(bearer);
        return Ok((StatusCode::OK, Json(body)).into_response());
    }

    let cookie = HeaderValue::from_str(&auth_cookie(&bearer, expires, config))
        .map_err(|e| ApiError::internal_server_error(format!("Invalid auth cookie: {}", e)))?;

    let mut response = (StatusCode::OK, Json(body)).into_response();
    response.headers_mut().insert(SET_COOKIE, cookie);
    Ok(response)
}
