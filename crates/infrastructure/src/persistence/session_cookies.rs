//! Persistence of the session cookie between process runs.
//!
//! The refresh credential is an HTTP-only cookie held in the HTTP client's
//! cookie jar. A short-lived process (the CLI) loses the jar on exit, so the
//! cookies scoped to the auth endpoints are saved next to the credentials file
//! and put back into a fresh jar on start.

use std::path::{Path, PathBuf};

use friendlines_application::ports::{FileSystem, StorageError};
use reqwest::Url;
use reqwest::cookie::{CookieStore, Jar};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::serialization::{from_json_bytes, to_json_stable_bytes};

#[derive(Debug, Default, Serialize, Deserialize)]
struct CookieDocument {
    cookies: Vec<String>,
}

/// File holding `name=value` pairs of the cookies sent to one URL.
#[derive(Debug)]
pub struct SessionCookieFile<F> {
    fs: F,
    path: PathBuf,
}

impl<F: FileSystem> SessionCookieFile<F> {
    /// Creates a cookie file handle.
    pub fn new(fs: F, path: impl Into<PathBuf>) -> Self {
        Self {
            fs,
            path: path.into(),
        }
    }

    /// Returns the cookie file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Adds the saved cookies to `jar`, scoped to `url`. Returns how many were restored.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file exists but cannot be read or parsed.
    pub async fn restore_into(&self, jar: &Jar, url: &Url) -> Result<usize, StorageError> {
        let content = match self.fs.read_file(&self.path).await {
            Ok(content) => content,
            Err(error) if error.is_not_found() => return Ok(0),
            Err(error) => return Err(error.into()),
        };
        let document: CookieDocument = from_json_bytes(&content)?;

        for cookie in &document.cookies {
            jar.add_cookie_str(cookie, url);
        }
        debug!(count = document.cookies.len(), "session cookies restored");
        Ok(document.cookies.len())
    }

    /// Saves the cookies `jar` would send to `url`. With none, the file is removed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file cannot be written or removed.
    pub async fn save_from(&self, jar: &Jar, url: &Url) -> Result<(), StorageError> {
        let cookies: Vec<String> = jar
            .cookies(url)
            .and_then(|header| header.to_str().ok().map(str::to_owned))
            .map(|header| {
                header
                    .split(';')
                    .map(str::trim)
                    .filter(|pair| !pair.is_empty())
                    .map(str::to_owned)
                    .collect()
            })
            .unwrap_or_default();

        if cookies.is_empty() {
            return self.clear().await;
        }

        let content = to_json_stable_bytes(&CookieDocument { cookies })?;
        self.fs.write_file(&self.path, &content).await?;
        debug!(path = %self.path.display(), "session cookies saved");
        Ok(())
    }

    /// Removes the file if present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the file cannot be removed.
    pub async fn clear(&self) -> Result<(), StorageError> {
        match self.fs.remove_file(&self.path).await {
            Err(error) if !error.is_not_found() => Err(error.into()),
            _ => Ok(()),
        }
    }
}
