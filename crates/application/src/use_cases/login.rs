//! Login use case.

use friendlines_domain::{AuthSession, LoginCredentials};
use tracing::info;

use crate::auth::TokenCoordinator;
use crate::error::ApplicationResult;
use crate::ports::{AuthEndpoint, CredentialStore};

/// Use case for signing in with a username and password.
///
/// Calls the login endpoint directly (there is no prior token to refresh)
/// and hands the resulting session to the coordinator for persistence.
pub struct Login<S, E> {
    coordinator: TokenCoordinator<S, E>,
}

impl<S, E> Login<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a new `Login` use case.
    #[must_use]
    pub const fn new(coordinator: TokenCoordinator<S, E>) -> Self {
        Self { coordinator }
    }

    /// Logs in and persists the session.
    ///
    /// # Errors
    /// - Returns an auth error if the backend rejects the credentials
    /// - Returns a storage error if the session cannot be persisted
    pub async fn execute(&self, credentials: &LoginCredentials) -> ApplicationResult<AuthSession> {
        info!(username = %credentials.username, "attempting login");
        let session = self.coordinator.endpoint().login(credentials).await?;
        let session = AuthSession::new(session.user, session.access_token);
        self.coordinator.begin_session(&session).await?;
        Ok(session)
    }
}
