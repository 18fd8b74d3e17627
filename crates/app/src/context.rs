//! Wiring of the adapters a command runs against.

use std::sync::Arc;

use anyhow::Context as _;
use friendlines_application::TokenCoordinator;
use friendlines_infrastructure::{
    AuthorizedClient, ClientConfig, FileCredentialStore, ReqwestAuthClient, SessionCookieFile,
    TokioFileSystem,
};
use reqwest::Url;
use reqwest::cookie::Jar;
use tracing::warn;

/// Credential store used by the CLI.
pub type Store = Arc<FileCredentialStore<TokioFileSystem>>;

/// Coordinator used by the CLI.
pub type Coordinator = TokenCoordinator<Store, ReqwestAuthClient>;

/// Authenticated API client used by the CLI.
pub type ApiClient = AuthorizedClient<Store, ReqwestAuthClient>;

const COOKIE_FILE: &str = "session-cookies.json";

/// Adapters for one CLI invocation.
///
/// The session cookie jar is restored from disk on creation and written back
/// by [`persist_cookies`](Self::persist_cookies).
pub struct AppContext {
    jar: Arc<Jar>,
    cookies: SessionCookieFile<TokioFileSystem>,
    cookie_url: Url,
    endpoint: ReqwestAuthClient,
    coordinator: Coordinator,
}

impl AppContext {
    /// Builds the adapters from configuration.
    ///
    /// # Errors
    ///
    /// Fails if the HTTP client cannot be built or the cookie file is unreadable.
    pub async fn new(config: &ClientConfig) -> anyhow::Result<Self> {
        let jar = Arc::new(Jar::default());
        let endpoint = ReqwestAuthClient::with_cookie_jar(config, Arc::clone(&jar))
            .context("failed to create HTTP client")?;
        let cookie_url = endpoint.refresh_url()?;

        let cookies = SessionCookieFile::new(
            TokioFileSystem::new(),
            config.credentials_path.with_file_name(COOKIE_FILE),
        );
        cookies
            .restore_into(&jar, &cookie_url)
            .await
            .with_context(|| format!("failed to read {}", cookies.path().display()))?;

        let store = Arc::new(FileCredentialStore::new(
            TokioFileSystem::new(),
            config.credentials_path.clone(),
        ));
        let coordinator = TokenCoordinator::new(store, endpoint.clone());

        Ok(Self {
            jar,
            cookies,
            cookie_url,
            endpoint,
            coordinator,
        })
    }

    /// The token coordinator.
    #[must_use]
    pub fn coordinator(&self) -> Coordinator {
        self.coordinator.clone()
    }

    /// A bearer-authenticated client sharing the session cookie jar.
    #[must_use]
    pub fn authorized_client(&self) -> ApiClient {
        AuthorizedClient::new(
            self.endpoint.http_client().clone(),
            self.endpoint.base_url().clone(),
            self.coordinator(),
        )
    }

    /// Writes the session cookie back to disk.
    ///
    /// Failures are logged only; the command's own outcome stands.
    pub async fn persist_cookies(&self) {
        if let Err(error) = self.cookies.save_from(&self.jar, &self.cookie_url).await {
            warn!(%error, "failed to save session cookies");
        }
    }

    /// Removes the saved session cookie.
    pub async fn forget_cookies(&self) {
        if let Err(error) = self.cookies.clear().await {
            warn!(%error, "failed to remove session cookies");
        }
    }
}
