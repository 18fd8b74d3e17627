//! In-memory credential storage.
//!
//! Useful for tests and for short-lived processes that should not leave
//! credentials on disk.

use std::sync::Arc;

use async_trait::async_trait;
use friendlines_domain::{AccessToken, UserRecord};
use tokio::sync::RwLock;

use crate::ports::{CredentialStore, StorageError};

#[derive(Debug, Default)]
struct Entries {
    access_token: Option<AccessToken>,
    user: Option<UserRecord>,
}

/// Thread-safe in-memory credential store.
///
/// Both entries live behind one lock, so `clear_all` is atomic.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCredentialStore {
    entries: Arc<RwLock<Entries>>,
}

impl InMemoryCredentialStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds a token and user.
    #[must_use]
    pub fn with_session(access_token: AccessToken, user: UserRecord) -> Self {
        Self {
            entries: Arc::new(RwLock::new(Entries {
                access_token: Some(access_token),
                user: Some(user),
            })),
        }
    }

    /// Returns true if neither entry is present.
    pub async fn is_empty(&self) -> bool {
        let entries = self.entries.read().await;
        entries.access_token.is_none() && entries.user.is_none()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        Ok(self.entries.read().await.access_token.clone())
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        self.entries.write().await.access_token = Some(token.clone());
        Ok(())
    }

    async fn user(&self) -> Result<Option<UserRecord>, StorageError> {
        Ok(self.entries.read().await.user.clone())
    }

    async fn set_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        self.entries.write().await.user = Some(user.clone());
        Ok(())
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let mut entries = self.entries.write().await;
        entries.access_token = None;
        entries.user = None;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    fn user() -> UserRecord {
        UserRecord::new("u-1", "jdoe", "Jane Doe", "jane@example.com")
    }

    #[tokio::test]
    async fn test_store_and_get_token() {
        let store = InMemoryCredentialStore::new();
        store
            .set_access_token(&AccessToken::new("access123"))
            .await
            .unwrap();

        let token = store.access_token().await.unwrap();
        assert_eq!(token.unwrap().as_str(), "access123");
    }

    #[tokio::test]
    async fn test_session_requires_both_entries() {
        let store = InMemoryCredentialStore::new();
        store.set_access_token(&AccessToken::new("tok")).await.unwrap();
        assert!(store.session().await.unwrap().is_none());

        store.set_user(&user()).await.unwrap();
        let session = store.session().await.unwrap().unwrap();
        assert_eq!(session.user.username, "jdoe");
        assert_eq!(session.access_token.as_str(), "tok");
    }

    #[tokio::test]
    async fn test_clear_all() {
        let store = InMemoryCredentialStore::with_session(AccessToken::new("tok"), user());
        assert!(!store.is_empty().await);

        store.clear_all().await.unwrap();
        assert!(store.is_empty().await);
        assert!(store.access_token().await.unwrap().is_none());
        assert!(store.user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let store = InMemoryCredentialStore::new();
        let handle = store.clone();
        store.set_user(&user()).await.unwrap();
        assert_eq!(handle.user().await.unwrap().unwrap().uuid, "u-1");
    }
}
