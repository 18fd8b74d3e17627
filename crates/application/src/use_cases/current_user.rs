//! Current-user use case.

use friendlines_domain::UserRecord;

use crate::auth::TokenCoordinator;
use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::{AuthEndpoint, CredentialStore};

/// Use case for fetching the signed-in user's profile.
///
/// The fetched record replaces the stored one, unless the session ended or
/// changed while the request was in flight.
pub struct FetchCurrentUser<S, E> {
    coordinator: TokenCoordinator<S, E>,
}

impl<S, E> FetchCurrentUser<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Creates a new `FetchCurrentUser` use case.
    #[must_use]
    pub const fn new(coordinator: TokenCoordinator<S, E>) -> Self {
        Self { coordinator }
    }

    /// Fetches the current user with a freshly validated token.
    ///
    /// # Errors
    /// - Returns [`ApplicationError::NotAuthenticated`] if no valid token exists
    /// - Returns an auth error if the profile request fails
    /// - Returns [`ApplicationError::NotAuthenticated`] if the session ended
    ///   before the profile could be stored
    pub async fn execute(&self) -> ApplicationResult<UserRecord> {
        let since = self.coordinator.generation();
        let token = self
            .coordinator
            .valid_token()
            .await
            .ok_or(ApplicationError::NotAuthenticated)?;

        let user = self
            .coordinator
            .endpoint()
            .current_user(&token)
            .await?
            .normalized();
        if !self.coordinator.update_user(since, &user).await? {
            return Err(ApplicationError::NotAuthenticated);
        }
        Ok(user)
    }
}
