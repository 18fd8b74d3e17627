//! Register use case.

use friendlines_domain::{AuthSession, RegisterCredentials};
use tracing::info;

use crate::auth::TokenCoordinator;
use crate::error::ApplicationResult;
use crate::ports::{AuthEndpoint, CredentialStore};

/// Use case for creating an account.
///
/// A successful registration signs the user in right away.
pub struct Register<S, E> {
    coordinator: TokenCoordinator<S, E>,
}

impl<S, E> Register<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a new `Register` use case.
    #[must_use]
    pub const fn new(coordinator: TokenCoordinator<S, E>) -> Self {
        Self { coordinator }
    }

    /// Registers the account and persists the resulting session.
    ///
    /// # Errors
    /// - Returns an auth error if the backend refuses the registration
    /// - Returns a storage error if the session cannot be persisted
    pub async fn execute(
        &self,
        credentials: &RegisterCredentials,
    ) -> ApplicationResult<AuthSession> {
        info!(username = %credentials.username, email = %credentials.email, "registering account");
        let session = self.coordinator.endpoint().register(credentials).await?;
        let session = AuthSession::new(session.user, session.access_token);
        self.coordinator.begin_session(&session).await?;
        Ok(session)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::auth::InMemoryCredentialStore;
    use crate::auth::testing::ScriptedEndpoint;

    #[tokio::test]
    async fn test_register_signs_in() {
        let store = InMemoryCredentialStore::new();
        let endpoint = Arc::new(ScriptedEndpoint::succeeding("unused"));
        let register = Register::new(TokenCoordinator::new(store.clone(), endpoint));
        let credentials =
            RegisterCredentials::new("testuser", "Test User", "test@example.com", "pw").unwrap();

        let session = register.execute(&credentials).await.unwrap();

        assert_eq!(session.access_token.as_str(), "login-token");
        assert_eq!(
            store.access_token().await.unwrap(),
            Some(session.access_token)
        );
    }
}
