//! Application-level errors

use domain::{DomainError, ValidationFailure};
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Payload rejected by the entry validator
    #[error(transparent)]
    Validation(#[from] ValidationFailure),

    /// Requested resource does not exist
    #[error("{0}")]
    NotFound(String),

    /// External service error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimited,

    /// Operation not allowed in the current state
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Not-found error for a weather record
    pub fn entry_not_found() -> Self {
        Self::NotFound("Weather entry not found".to_string())
    }
}
