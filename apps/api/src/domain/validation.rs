// Field-level constraint checks shared by all entities
// Constraints run in declared order and stop at the first violation

use url::Url;

use super::errors::{DomainError, DomainResult};

/// Entities that must pass field constraints before they are persisted
pub trait Validate {
    /// Runs every constraint in declared order
    ///
    /// # Returns
    /// * `Ok(())` - All constraints hold
    /// * `Err(DomainError::BadRequest)` - The first violated constraint's message
    fn validate(&self) -> DomainResult<()>;
}

/// Validates an entity, converting the first violation into a bad request
///
/// # Example
/// ```
/// use podcast_api::domain::feed_url::FeedUrl;
/// use podcast_api::domain::validation::validate_or_throw;
///
/// let feed_url = FeedUrl::new("not a url");
/// assert!(validate_or_throw(&feed_url).is_err());
/// ```
pub fn validate_or_throw<T: Validate>(entity: &T) -> DomainResult<()> {
    entity.validate().map_err(|e| {
        tracing::debug!("Validation failed: {}", e);
        e
    })
}

/// Requires an http(s) URL with a host
pub fn is_url(field: &str, value: &str) -> DomainResult<()> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.host_str().is_some())
        .unwrap_or(false);

    if valid {
        Ok(())
    } else {
        Err(DomainError::BadRequest(format!(
            "{} must be an URL address",
            field
        )))
    }
}

/// Requires a string with at least one non-whitespace character
pub fn is_not_empty(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        Err(DomainError::BadRequest(format!(
            "{} should not be empty",
            field
        )))
    } else {
        Ok(())
    }
}

/// Requires a value no smaller than `min`
pub fn is_min(field: &str, value: i64, min: i64) -> DomainResult<()> {
    if value < min {
        Err(DomainError::BadRequest(format!(
            "{} must not be less than {}",
            field, min
        )))
    } else {
        Ok(())
    }
}
