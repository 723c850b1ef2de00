// Bearer token creation and verification
// Tokens and the auth cookie share the same lifetime

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// JWT claims structure
///
/// # Fields
/// * `sub` - Subject (user_id)
/// * `iat` - Issued at (seconds since epoch)
/// * `exp` - Expiry time (seconds since epoch)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub iat: usize,
    pub exp: usize,
}

/// Moment a freshly issued token and cookie stop being valid
pub fn auth_expires(days: i64) -> DateTime<Utc> {
    Utc::now() + Duration::days(days)
}

/// Creates a signed token for a user
///
/// # Arguments
/// * `user_id` - The user's ID, stored in the `sub` claim
/// * `secret` - HS256 signing secret
/// * `expires_at` - Expiry written to the `exp` claim
///
/// # Example
/// ```
/// use podcast_api::auth::jwt::{auth_expires, create_token, verify_token};
/// use uuid::Uuid;
///
/// let user_id = Uuid::new_v4();
/// let token = create_token(user_id, "secret", auth_expires(1)).unwrap();
/// assert_eq!(verify_token(&token, "secret").unwrap().sub, user_id);
/// ```
pub fn create_token(
    user_id: Uuid,
    secret: &str,
    expires_at: DateTime<Utc>,
) -> Result<String, String> {
    let claims = Claims {
        sub: user_id,
        iat: Utc::now().timestamp() as usize,
        exp: expires_at.timestamp() as usize,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| e.to_string())
}

/// Verifies signature and expiry, returning the decoded claims
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_SECRET: &str = "test-secret-key-for-unit-tests";

    #[test]
    fn create_and_verify_token() {
        let user_id = Uuid::new_v4();
        let token = create_token(user_id, TEST_SECRET, auth_expires(365)).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.sub, user_id);
        assert!(claims.iat <= claims.exp);
    }

    #[test]
    fn wrong_secret_fails() {
        let token = create_token(Uuid::new_v4(), TEST_SECRET, auth_expires(1)).expect("valid token");

        assert!(verify_token(&token, "wrong-secret").is_err());
    }

    #[test]
    fn invalid_token_fails() {
        assert!(verify_token("invalid.token.string", TEST_SECRET).is_err());
    }

    #[test]
    fn expired_token_fails() {
        let expired = Utc::now() - Duration::days(2);
        let token = create_token(Uuid::new_v4(), TEST_SECRET, expired).expect("valid token");

        assert!(verify_token(&token, TEST_SECRET).is_err());
    }

    #[test]
    fn expiry_matches_cookie_lifetime() {
        let expires_at = auth_expires(30);
        let token = create_token(Uuid::new_v4(), TEST_SECRET, expires_at).expect("valid token");

        let claims = verify_token(&token, TEST_SECRET).expect("valid verification");
        assert_eq!(claims.exp as i64, expires_at.timestamp());
    }
}
