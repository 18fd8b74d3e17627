//! File access port used by file-backed stores.

use std::future::Future;
use std::path::{Path, PathBuf};

/// Error type for file operations.
#[derive(Debug, thiserror::Error)]
pub enum FileSystemError {
    /// The file does not exist. Stores treat this as "nothing saved yet".
    #[error("File not found: {0}")]
    NotFound(PathBuf),

    /// The process may not access the file.
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    /// Any other I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl FileSystemError {
    /// Whether the error only means the file is absent.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

impl From<FileSystemError> for super::StorageError {
    fn from(error: FileSystemError) -> Self {
        Self::io(error.to_string())
    }
}

/// Whole-file operations.
///
/// Credential files are small and always rewritten entirely, so there is
/// no streaming or partial access. Implementations report a missing file as
/// [`FileSystemError::NotFound`] rather than a generic I/O error.
pub trait FileSystem: Send + Sync {
    /// Reads the whole file.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::NotFound`] for a missing file, or another
    /// error if it cannot be read.
    fn read_file(&self, path: &Path) -> impl Future<Output = Result<Vec<u8>, FileSystemError>> + Send;

    /// Replaces the file's content, creating missing parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    fn write_file(
        &self,
        path: &Path,
        contents: &[u8],
    ) -> impl Future<Output = Result<(), FileSystemError>> + Send;

    /// Deletes the file.
    ///
    /// # Errors
    ///
    /// Returns [`FileSystemError::NotFound`] for a missing file, or another
    /// error if it cannot be removed.
    fn remove_file(&self, path: &Path) -> impl Future<Output = Result<(), FileSystemError>> + Send;

    /// Moves `from` over `to`, replacing it.
    ///
    /// # Errors
    ///
    /// Returns an error if the rename fails.
    fn rename(
        &self,
        from: &Path,
        to: &Path,
    ) -> impl Future<Output = Result<(), FileSystemError>> + Send;
}
