//! Application error types

use friendlines_domain::{AuthError, DomainError};
use thiserror::Error;

use crate::auth::RefreshError;
use crate::ports::StorageError;

/// Application-level errors.
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Input failed domain validation.
    #[error("domain error: {0}")]
    Domain(#[from] DomainError),

    /// An auth endpoint call failed.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A token refresh failed.
    #[error("token refresh failed: {0}")]
    Refresh(#[from] RefreshError),

    /// Reading or writing stored credentials failed.
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),

    /// No valid session exists; the user must log in.
    #[error("not authenticated")]
    NotAuthenticated,
}

impl ApplicationError {
    /// Returns true if the caller should route the user to the login flow.
    ///
    /// Every refresh failure qualifies: refreshes fail closed.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        match self {
            Self::NotAuthenticated | Self::Refresh(_) => true,
            Self::Auth(error) => error.requires_login(),
            Self::Domain(_) | Self::Storage(_) => false,
        }
    }
}

/// Result type alias for application operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
