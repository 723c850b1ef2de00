use thiserror::Error;

/// Errors raised by controllers and entity validation
///
/// Each variant maps onto one HTTP status at the API boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Internal(String),
}

impl From<String> for DomainError {
    fn from(message: String) -> Self {
        DomainError::Internal(message)
    }
}

pub type DomainResult<T> = Result<T, DomainError>;
