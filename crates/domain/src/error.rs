//! Domain error types

use thiserror::Error;

/// Domain-level errors that can occur during validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An access token value is unusable.
    #[error("invalid token: {0}")]
    InvalidToken(String),

    /// Login or registration input failed validation.
    #[error("invalid credentials: {0}")]
    InvalidCredentials(String),

    /// A request payload for the social API failed validation.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Result type alias for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
