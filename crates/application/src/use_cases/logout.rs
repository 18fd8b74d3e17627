//! Logout use case.

use tracing::{info, warn};

use crate::auth::TokenCoordinator;
use crate::error::ApplicationResult;
use crate::ports::{AuthEndpoint, CredentialStore};

/// Result of a logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoutOutput {
    /// Whether the backend confirmed the session invalidation.
    pub server_acknowledged: bool,
}

/// Use case for signing out.
///
/// Server-side invalidation is best effort; local credentials are cleared
/// regardless of its outcome.
pub struct Logout<S, E> {
    coordinator: TokenCoordinator<S, E>,
}

impl<S, E> Logout<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a new `Logout` use case.
    #[must_use]
    pub const fn new(coordinator: TokenCoordinator<S, E>) -> Self {
        Self { coordinator }
    }

    /// Logs out remotely (best effort), then clears local credentials.
    ///
    /// # Errors
    /// Returns a storage error if local credentials could not be cleared;
    /// the logout should then be retried.
    pub async fn execute(&self) -> ApplicationResult<LogoutOutput> {
        let server_acknowledged = match self.coordinator.endpoint().logout().await {
            Ok(()) => true,
            Err(error) => {
                warn!(%error, "server logout failed, clearing local session anyway");
                false
            }
        };

        self.coordinator.end_session().await?;
        info!(server_acknowledged, "logged out");
        Ok(LogoutOutput {
            server_acknowledged,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use std::sync::Arc;

    use friendlines_domain::{AccessToken, AuthError};

    use super::*;
    use crate::ApplicationError;
    use crate::auth::testing::{FlakyStore, ScriptedEndpoint, sample_user};
    use crate::auth::InMemoryCredentialStore;

    #[tokio::test]
    async fn test_logout_clears_credentials() {
        let store = InMemoryCredentialStore::with_session(AccessToken::new("tok"), sample_user());
        let endpoint = Arc::new(ScriptedEndpoint::succeeding("unused"));
        let logout = Logout::new(TokenCoordinator::new(store.clone(), Arc::clone(&endpoint)));

        let output = logout.execute().await.unwrap();

        assert!(output.server_acknowledged);
        assert!(store.is_empty().await);
        assert_eq!(endpoint.logout_calls(), 1);
    }

    #[tokio::test]
    async fn test_server_failure_does_not_block_local_logout() {
        let store = InMemoryCredentialStore::with_session(AccessToken::new("tok"), sample_user());
        let endpoint = Arc::new(ScriptedEndpoint::succeeding("unused"));
        endpoint.logout_responds_with(Err(AuthError::network("connection refused")));
        let logout = Logout::new(TokenCoordinator::new(store.clone(), endpoint));

        let output = logout.execute().await.unwrap();

        assert!(!output.server_acknowledged);
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_clear_failure_is_reported() {
        let store = Arc::new(FlakyStore::with_session(AccessToken::new("tok"), sample_user()));
        store.fail_clear(true);
        let endpoint = Arc::new(ScriptedEndpoint::succeeding("unused"));
        let logout = Logout::new(TokenCoordinator::new(Arc::clone(&store), endpoint));

        let error = logout.execute().await.unwrap_err();

        assert!(matches!(error, ApplicationError::Storage(_)));
        assert!(store.access_token().await.unwrap().is_some());
    }
}
