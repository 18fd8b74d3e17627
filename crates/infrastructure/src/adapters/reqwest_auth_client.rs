//! Auth endpoint implementation using reqwest.
//!
//! The refresh endpoint identifies the session through an HTTP-only cookie
//! set at login. The underlying `reqwest::Client` keeps a cookie store, so
//! every request made through the same client carries it.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use friendlines_application::ports::AuthEndpoint;
use friendlines_domain::{
    AccessToken, AuthError, AuthSession, LoginCredentials, RegisterCredentials, UserRecord,
};
use reqwest::cookie::Jar;
use reqwest::{Client, ClientBuilder, Url};
use serde::Deserialize;
use tracing::{debug, info};

use super::response::{endpoint_url, map_transport_error, read_body, read_envelope};
use crate::config::ClientConfig;

const LOGIN_PATH: &str = "/auth/login";
const REGISTER_PATH: &str = "/users/register";
const REFRESH_PATH: &str = "/auth/refresh";
const LOGOUT_PATH: &str = "/auth/logout";
const PROFILE_PATH: &str = "/users/profile";

/// `data` of login, register and refresh responses.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthPayload {
    user: UserRecord,
    #[serde(alias = "token")]
    access_token: String,
}

impl TryFrom<AuthPayload> for AuthSession {
    type Error = AuthError;

    fn try_from(payload: AuthPayload) -> Result<Self, Self::Error> {
        let token = AccessToken::parse(payload.access_token)
            .map_err(|e| AuthError::malformed(e.to_string()))?;
        Ok(Self::new(payload.user, token))
    }
}

/// `data` of the profile response.
#[derive(Debug, Deserialize)]
struct ProfilePayload {
    user: UserRecord,
}

/// Auth endpoint client implementation using reqwest.
#[derive(Debug, Clone)]
pub struct ReqwestAuthClient {
    client: Client,
    base_url: Url,
}

impl ReqwestAuthClient {
    /// Creates a client from configuration with its own cookie store.
    ///
    /// The client follows no redirects and applies the configured timeout to
    /// every request.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot
    /// be created.
    pub fn new(config: &ClientConfig) -> Result<Self, AuthError> {
        Self::build(config, Client::builder().cookie_store(true))
    }

    /// Creates a client whose cookies live in `jar`, so the caller can
    /// persist and restore the session cookie.
    ///
    /// # Errors
    ///
    /// Same as [`new`](Self::new).
    pub fn with_cookie_jar(config: &ClientConfig, jar: Arc<Jar>) -> Result<Self, AuthError> {
        Self::build(config, Client::builder().cookie_provider(jar))
    }

    fn build(config: &ClientConfig, builder: ClientBuilder) -> Result<Self, AuthError> {
        let base_url = config
            .api_url()
            .map_err(|e| AuthError::network(e.to_string()))?;
        let client = builder
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AuthError::network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self::with_client(client, base_url))
    }

    /// URL of the refresh endpoint, where the session cookie is sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be built from the base URL.
    pub fn refresh_url(&self) -> Result<Url, AuthError> {
        endpoint_url(&self.base_url, REFRESH_PATH)
    }

    /// Creates a client over an existing `reqwest::Client`.
    #[must_use]
    pub const fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    /// The underlying HTTP client (shares the session cookie jar).
    #[must_use]
    pub const fn http_client(&self) -> &Client {
        &self.client
    }

    /// The API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    async fn post_for_session<B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: Option<&B>,
    ) -> Result<AuthSession, AuthError> {
        let url = endpoint_url(&self.base_url, path)?;
        debug!(%url, "POST");

        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await.map_err(|e| map_transport_error(&e))?;

        let payload: AuthPayload = read_envelope(response).await?;
        AuthSession::try_from(payload)
    }
}

#[async_trait]
impl AuthEndpoint for ReqwestAuthClient {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, AuthError> {
        let session = self
            .post_for_session(LOGIN_PATH, Some(credentials))
            .await?;
        info!(user = %session.user.user_id(), "login succeeded");
        Ok(session)
    }

    async fn register(
        &self,
        credentials: &RegisterCredentials,
    ) -> Result<AuthSession, AuthError> {
        let session = self
            .post_for_session(REGISTER_PATH, Some(credentials))
            .await?;
        info!(user = %session.user.user_id(), "registration succeeded");
        Ok(session)
    }

    async fn refresh(&self) -> Result<AuthSession, AuthError> {
        self.post_for_session::<()>(REFRESH_PATH, None).await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let url = endpoint_url(&self.base_url, LOGOUT_PATH)?;
        debug!(%url, "POST");

        let response = self
            .client
            .post(url)
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;
        read_body(response).await?;
        Ok(())
    }

    async fn current_user(&self, token: &AccessToken) -> Result<UserRecord, AuthError> {
        let url = endpoint_url(&self.base_url, PROFILE_PATH)?;
        debug!(%url, token = %token.preview(), "GET");

        let response = self
            .client
            .get(url)
            .bearer_auth(token.as_str())
            .send()
            .await
            .map_err(|e| map_transport_error(&e))?;

        let payload: ProfilePayload = read_envelope(response).await?;
        Ok(payload.user.normalized())
    }
}
