//! Auth endpoint port
//!
//! Typed wrapper over the backend's authentication endpoints.

use async_trait::async_trait;
use friendlines_domain::{
    AccessToken, AuthError, AuthSession, LoginCredentials, RegisterCredentials, UserRecord,
};

/// Port for the backend authentication endpoints.
///
/// Any non-success status, or a success status whose body lacks the
/// expected `user`/`accessToken` fields, is reported as an [`AuthError`].
#[async_trait]
pub trait AuthEndpoint: Send + Sync {
    /// Exchanges a username and password for a session.
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, AuthError>;

    /// Creates an account and returns the resulting session.
    async fn register(&self, credentials: &RegisterCredentials)
    -> Result<AuthSession, AuthError>;

    /// Issues a new access token.
    ///
    /// Takes no token: the backend identifies the session through an ambient
    /// refresh credential (an HTTP-only cookie) managed by the transport.
    async fn refresh(&self) -> Result<AuthSession, AuthError>;

    /// Invalidates the server-side session. Best effort.
    async fn logout(&self) -> Result<(), AuthError>;

    /// Fetches the profile of the user the token belongs to.
    async fn current_user(&self, token: &AccessToken) -> Result<UserRecord, AuthError>;
}

#[async_trait]
impl<T: AuthEndpoint + ?Sized> AuthEndpoint for std::sync::Arc<T> {
    async fn login(&self, credentials: &LoginCredentials) -> Result<AuthSession, AuthError> {
        (**self).login(credentials).await
    }

    async fn register(
        &self,
        credentials: &RegisterCredentials,
    ) -> Result<AuthSession, AuthError> {
        (**self).register(credentials).await
    }

    async fn refresh(&self) -> Result<AuthSession, AuthError> {
        (**self).refresh().await
    }

    async fn logout(&self) -> Result<(), AuthError> {
        (**self).logout().await
    }

    async fn current_user(&self, token: &AccessToken) -> Result<UserRecord, AuthError> {
        (**self).current_user(token).await
    }
}
