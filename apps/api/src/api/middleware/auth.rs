use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{
        header::{AUTHORIZATION, COOKIE},
        request::Parts,
        HeaderMap,
    },
};
use uuid::Uuid;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::auth::jwt::verify_token;

/// Cookie carrying the bearer token for browser clients
pub const AUTH_COOKIE_NAME: &str = "Authorization";

/// JWT authentication extractor for protected routes
///
/// Reads `Authorization: Bearer <token>`, falling back to the
/// `Authorization` cookie set at login.
///
/// Usage:
/// ```rust,ignore
/// async fn protected_handler(
///     JwtAuth(user_id): JwtAuth,
/// ) -> Result<String, ApiError> {
///     Ok(format!("Hello user {}", user_id))
/// }
/// ```
pub struct JwtAuth(pub Uuid);

/// Like [`JwtAuth`], but a request without credentials yields `None`
///
/// Credentials that are present but invalid are still rejected.
pub struct OptionalJwtAuth(pub Option<Uuid>);

fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookie| cookie.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim().replace("%20", " "))
}

/// Raw `Bearer ...` credential from the header or the auth cookie
fn bearer_credential(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| read_cookie(headers, AUTH_COOKIE_NAME))
}

fn verify_credential(credential: &str, secret: &str) -> Result<Uuid, ApiError> {
    let token = credential
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::unauthorized("Invalid authorization format. Use: Bearer <token>"))?;

    let claims = verify_token(token.trim(), secret)
        .map_err(|e| ApiError::unauthorized(format!("Invalid token: {}", e)))?;

    Ok(claims.sub)
}

#[async_trait]
impl<S> FromRequestParts<S> for JwtAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        let credential = bearer_credential(&parts.headers)
            .ok_or_else(|| ApiError::unauthorized("Missing authorization header"))?;

        Ok(JwtAuth(verify_credential(&credential, &state.config.jwt_secret)?))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for OptionalJwtAuth
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let state = AppState::from_ref(state);

        match bearer_credential(&parts.headers) {
            Some(credential) => Ok(OptionalJwtAuth(Some(verify_credential(
                &credential,
                &state.config.jwt_secret,
            )?))),
            None => Ok(OptionalJwtAuth(None)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn reads_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(
            COOKIE,
            HeaderValue::from_static("theme=dark; Authorization=Bearer%20abc.def; other=1"),
        );

        assert_eq!(
            read_cookie(&headers, AUTH_COOKIE_NAME).as_deref(),
            Some("Bearer abc.def")
        );
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer from-header"));
        headers.insert(COOKIE, HeaderValue::from_static("Authorization=Bearer from-cookie"));

        assert_eq!(
            bearer_credential(&headers).as_deref(),
            Some("Bearer from-header")
        );
    }

    #[test]
    fn credential_requires_bearer_scheme() {
        let err = verify_credential("Token abc", "secret").unwrap_err();
        assert_eq!(err.status, axum::http::StatusCode::UNAUTHORIZED);
    }
}
