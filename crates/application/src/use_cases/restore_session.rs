//! Restore-session use case.

use friendlines_domain::AuthSession;
use tracing::debug;

use crate::auth::TokenCoordinator;
use crate::error::ApplicationResult;
use crate::ports::{AuthEndpoint, CredentialStore};

/// Use case for picking up a stored session at startup.
///
/// Reads local state only; the token is re-validated on first use.
pub struct RestoreSession<S, E> {
    coordinator: TokenCoordinator<S, E>,
}

impl<S, E> RestoreSession<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a new `RestoreSession` use case.
    #[must_use]
    pub const fn new(coordinator: TokenCoordinator<S, E>) -> Self {
        Self { coordinator }
    }

    /// Returns the stored session, if any.
    ///
    /// # Errors
    /// Returns a storage error if the store cannot be read.
    pub async fn execute(&self) -> ApplicationResult<Option<AuthSession>> {
        let session = self.coordinator.current_session().await?;
        debug!(restored = session.is_some(), "restored stored session");
        Ok(session)
    }
}
