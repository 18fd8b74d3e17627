//! Bearer-authenticated requests against the backend API.

use friendlines_application::ports::{AuthEndpoint, CredentialStore};
use friendlines_application::TokenCoordinator;
use friendlines_domain::AuthError;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

use super::api::{FriendshipsApi, GroupsApi, NewsflashesApi, NotificationsApi, UsersApi};
use super::response::{
    endpoint_url, map_transport_error, read_ack, read_body, read_envelope, resource_url,
};

/// HTTP client that attaches a freshly validated access token to every request.
///
/// Each request asks the [`TokenCoordinator`] for a valid token first. When
/// none is available the request is not sent and
/// [`AuthError::NotAuthenticated`] is returned.
pub struct AuthorizedClient<S, E> {
    http: Client,
    base_url: Url,
    coordinator: TokenCoordinator<S, E>,
}

impl<S, E> AuthorizedClient<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a client. `http` should share its cookie store with the auth endpoint client.
    pub const fn new(http: Client, base_url: Url, coordinator: TokenCoordinator<S, E>) -> Self {
        Self {
            http,
            base_url,
            coordinator,
        }
    }

    /// The coordinator tokens are obtained from.
    pub const fn coordinator(&self) -> &TokenCoordinator<S, E> {
        &self.coordinator
    }

    /// `GET path`, returning the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::NotAuthenticated`] without a valid token, or the
    /// transport/rejection/decoding error of the request.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, AuthError> {
        let request = self.request(Method::GET, path).await?;
        self.send_for_data(request).await
    }

    /// `POST path` with a JSON body, returning the envelope's `data`.
    ///
    /// # Errors
    ///
    /// Same as [`get_json`](Self::get_json).
    pub async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, AuthError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = self.request(Method::POST, path).await?.json(body);
        self.send_for_data(request).await
    }

    /// `DELETE path`, checking the status only.
    ///
    /// # Errors
    ///
    /// Same as [`get_json`](Self::get_json).
    pub async fn delete(&self, path: &str) -> Result<(), AuthError> {
        let request = self.request(Method::DELETE, path).await?;
        let response = request.send().await.map_err(|e| map_transport_error(&e))?;
        read_body(response).await?;
        Ok(())
    }

    /// Newsflash creation and feeds.
    pub const fn newsflashes(&self) -> NewsflashesApi<'_, S, E> {
        NewsflashesApi::new(self)
    }

    /// Friend requests and friend lists.
    pub const fn friendships(&self) -> FriendshipsApi<'_, S, E> {
        FriendshipsApi::new(self)
    }

    /// Group management.
    pub const fn groups(&self) -> GroupsApi<'_, S, E> {
        GroupsApi::new(self)
    }

    /// User search and profiles.
    pub const fn users(&self) -> UsersApi<'_, S, E> {
        UsersApi::new(self)
    }

    /// Push device registration.
    pub const fn notifications(&self) -> NotificationsApi<'_, S, E> {
        NotificationsApi::new(self)
    }

    async fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, AuthError> {
        let url = endpoint_url(&self.base_url, path)?;
        self.authorize(method, url).await
    }

    /// URL of an API resource below the base URL.
    pub(crate) fn resource(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<Url, AuthError> {
        resource_url(&self.base_url, segments, query)
    }

    /// Starts a request carrying a freshly validated bearer token.
    pub(crate) async fn authorize(
        &self,
        method: Method,
        url: Url,
    ) -> Result<RequestBuilder, AuthError> {
        let token = self
            .coordinator
            .valid_token()
            .await
            .ok_or(AuthError::NotAuthenticated)?;

        debug!(%method, %url, "authorized request");
        Ok(self.http.request(method, url).bearer_auth(token.as_str()))
    }

    pub(crate) async fn send_for_data<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<T, AuthError> {
        let response = request.send().await.map_err(|e| map_transport_error(&e))?;
        read_envelope(response).await
    }

    pub(crate) async fn send_for_ack(&self, request: RequestBuilder) -> Result<(), AuthError> {
        let response = request.send().await.map_err(|e| map_transport_error(&e))?;
        read_ack(response).await
    }
}
