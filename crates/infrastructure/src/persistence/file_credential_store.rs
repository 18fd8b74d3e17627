//! File-based credential store implementation.
//!
//! The access token and user record live in a single JSON document so both
//! entries always change together. Writes go to a temporary file that is then
//! renamed over the existing file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use friendlines_application::ports::{CredentialStore, FileSystem, StorageError};
use friendlines_domain::{AccessToken, UserRecord};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

const SCHEMA_VERSION: u32 = 1;

const fn default_schema_version() -> u32 {
    SCHEMA_VERSION
}

/// On-disk layout:
/// ```json
/// {
///   "schema_version": 1,
///   "accessToken": "eyJhbGciOi...",
///   "user": { "uuid": "...", "username": "...", "fullName": "...", "email": "..." }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct CredentialsDocument {
    #[serde(default = "default_schema_version")]
    schema_version: u32,
    #[serde(
        rename = "accessToken",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    access_token: Option<AccessToken>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserRecord>,
}

impl Default for CredentialsDocument {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            access_token: None,
            user: None,
        }
    }
}

/// File-based credential store.
///
/// Read-modify-write cycles are serialized within the process.
#[derive(Debug)]
pub struct FileCredentialStore<F> {
    fs: F,
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl<F: FileSystem> FileCredentialStore<F> {
    /// Creates a store backed by the given file.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    /// Returns the credentials file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    async fn load(&self) -> Result<CredentialsDocument, StorageError> {
        match self.fs.read_file(&self.path).await {
            Ok(content) => Ok(from_json_bytes(&content)?),
            Err(error) if error.is_not_found() => Ok(CredentialsDocument::default()),
            Err(error) => Err(error.into()),
        }
    }

    async fn save(&self, document: &CredentialsDocument) -> Result<(), StorageError> {
        let content = to_json_stable_bytes(document)?;

        let temp = self.temp_path();
        self.fs.write_file(&temp, &content).await?;
        self.fs.rename(&temp, &self.path).await?;
        debug!(path = %self.path.display(), "credentials written");
        Ok(())
    }

    async fn update(
        &self,
        apply: impl FnOnce(&mut CredentialsDocument) + Send,
    ) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        let mut document = self.load().await?;
        apply(&mut document);
        self.save(&document).await
    }
}

#[async_trait]
impl<F: FileSystem> CredentialStore for FileCredentialStore<F> {
    async fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        Ok(self.load().await?.access_token)
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        let token = token.clone();
        self.update(move |document| document.access_token = Some(token))
            .await
    }

    async fn user(&self) -> Result<Option<UserRecord>, StorageError> {
        Ok(self.load().await?.user)
    }

    async fn set_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        let user = user.clone();
        self.update(move |document| document.user = Some(user)).await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;
        match self.fs.remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "credentials file removed");
                Ok(())
            }
            Err(error) if error.is_not_found() => Ok(()),
            Err(error) => Err(error.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    use super::*;
    use crate::TokioFileSystem;

    fn user() -> UserRecord {
        UserRecord::new("u-1", "jdoe", "Jane Doe", "jane@example.com")
    }

    #[tokio::test]
    async fn test_missing_file_reads_as_empty() {
        let dir = tempdir().unwrap();
        let store = FileCredentialStore::new(TokioFileSystem::new(), dir.path().join("creds.json"));

        assert!(store.access_token().await.unwrap().is_none());
        assert!(store.user().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_token_and_user_roundtrip_through_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("creds.json");
        let store = FileCredentialStore::new(TokioFileSystem::new(), &path);

        store.set_access_token(&AccessToken::new("tok")).await.unwrap();
        store.set_user(&user()).await.unwrap();

        let reopened = FileCredentialStore::new(TokioFileSystem::new(), &path);
        let session = reopened.session().await.unwrap().unwrap();
        assert_eq!(session.access_token.as_str(), "tok");
        assert_eq!(session.user, user());
        assert!(!dir.path().join("nested").join("creds.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_file_layout() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("creds.json");
        let store = FileCredentialStore::new(TokioFileSystem::new(), &path);
        store.set_access_token(&AccessToken::new("tok")).await.unwrap();

        let written: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            written,
            serde_json::json!({ "schema_version": 1, "accessToken": "tok" })
        );
    }

    #[tokio::test]
    async fn test_clear_all_removes_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("creds.json");
        let store = FileCredentialStore::new(TokioFileSystem::new(), &path);
        store.set_access_token(&AccessToken::new("tok")).await.unwrap();
        store.set_user(&user()).await.unwrap();

        store.clear_all().await.unwrap();

        assert!(!path.exists());
        assert!(store.session().await.unwrap().is_none());
        // Clearing twice is fine.
        store.clear_all().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("creds.json");
        std::fs::write(&path, b"not json").unwrap();
        let store = FileCredentialStore::new(TokioFileSystem::new(), &path);

        let error = store.access_token().await.unwrap_err();
        assert!(matches!(error, StorageError::Serialization { .. }));
    }

    #[test]
    fn test_temp_path() {
        let store = FileCredentialStore::new(TokioFileSystem::new(), "/data/creds.json");
        assert_eq!(store.temp_path(), PathBuf::from("/data/creds.json.tmp"));
    }
}
