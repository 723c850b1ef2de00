// Password hashing for local email/password login

use bcrypt::{hash, verify};

/// Hashes a password with an explicit bcrypt cost (4..=31)
pub fn hash_password_with_cost(password: &str, cost: u32) -> Result<String, String> {
    hash(password, cost).map_err(|e| format!("Failed to hash password: {}", e))
}

/// Checks a password against a stored bcrypt hash
///
/// A malformed stored hash is reported as an error, not as a mismatch.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, String> {
    verify(password, hash).map_err(|e| format!("Password verification failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    // Minimum cost keeps the tests fast
    const TEST_COST: u32 = 4;

    #[test]
    fn hash_and_verify_password() {
        let hash = hash_password_with_cost("correct horse", TEST_COST).unwrap();

        assert!(verify_password("correct horse", &hash).unwrap());
        assert!(!verify_password("battery staple", &hash).unwrap());
    }

    #[test]
    fn hashes_are_salted() {
        let first = hash_password_with_cost("same", TEST_COST).unwrap();
        let second = hash_password_with_cost("same", TEST_COST).unwrap();

        assert_ne!(first, second);
    }

    #[test]
    fn malformed_hash_is_an_error() {
        assert!(verify_password("anything", "not-a-bcrypt-hash").is_err());
    }
}
