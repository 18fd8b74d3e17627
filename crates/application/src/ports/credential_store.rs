//! Credential store port
//!
//! Defines the interface for persisting the access token and user record.

use async_trait::async_trait;
use friendlines_domain::{AccessToken, AuthSession, UserRecord};

/// Errors that can occur while reading or writing stored credentials.
///
/// Cloneable so a storage failure inside a shared refresh can reach every
/// waiting caller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StorageError {
    /// I/O error.
    #[error("I/O error: {message}")]
    Io {
        /// Error description.
        message: String,
    },

    /// Serialization/deserialization error.
    #[error("serialization error: {message}")]
    Serialization {
        /// Error description.
        message: String,
    },
}

impl StorageError {
    /// Creates an I/O error.
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a serialization error.
    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(error: std::io::Error) -> Self {
        Self::io(error.to_string())
    }
}

/// Durable storage for exactly two entries: the access token and the user.
///
/// Implementations perform no network calls.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Reads the stored access token.
    async fn access_token(&self) -> Result<Option<AccessToken>, StorageError>;

    /// Stores the access token, replacing any previous one.
    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError>;

    /// Reads the stored user record.
    async fn user(&self) -> Result<Option<UserRecord>, StorageError>;

    /// Stores the user record, replacing any previous one.
    async fn set_user(&self, user: &UserRecord) -> Result<(), StorageError>;

    /// Removes both entries.
    ///
    /// Must not leave one entry behind on success. An error means the caller
    /// is still (partially) logged in locally and should retry.
    async fn clear_all(&self) -> Result<(), StorageError>;

    /// Reads the full session; `None` unless both entries are present.
    async fn session(&self) -> Result<Option<AuthSession>, StorageError> {
        let Some(access_token) = self.access_token().await? else {
            return Ok(None);
        };
        Ok(self.user().await?.map(|user| AuthSession { user, access_token }))
    }
}

#[async_trait]
impl<T: CredentialStore + ?Sized> CredentialStore for std::sync::Arc<T> {
    async fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        (**self).access_token().await
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        (**self).set_access_token(token).await
    }

    async fn user(&self) -> Result<Option<UserRecord>, StorageError> {
        (**self).user().await
    }

    async fn set_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        (**self).set_user(user).await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        (**self).clear_all().await
    }
}
