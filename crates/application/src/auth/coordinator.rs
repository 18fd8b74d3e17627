//! Access-token coordination.
//!
//! The [`TokenCoordinator`] is the single choke point through which every
//! authenticated call obtains its bearer token. It owns refresh concurrency:
//! at most one refresh runs at a time, and every caller that arrives while it
//! runs awaits that same operation and observes the identical outcome.
//!
//! Failures are never cached. Once a refresh settles the slot is emptied and
//! the next caller starts a new refresh.
//!
//! Refresh failures fail closed: local credentials are cleared so the client
//! never keeps a token it could not confirm.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use friendlines_domain::{AccessToken, AuthError, AuthSession, UserRecord};
use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::{debug, info, warn};

use crate::ports::{AuthEndpoint, CredentialStore, StorageError};

/// Failure of a token refresh, as seen by every caller of that refresh.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RefreshError {
    /// The refresh endpoint failed (network, rejection, malformed body).
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The refreshed credentials could not be persisted.
    #[error("failed to persist refreshed credentials: {0}")]
    Storage(#[from] StorageError),

    /// The session was ended or replaced while the refresh was in flight;
    /// its result was discarded.
    #[error("session ended while the token refresh was in flight")]
    SessionEnded,
}

/// Observable state of the refresh slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshState {
    /// No refresh in flight.
    Idle,
    /// Exactly one refresh outstanding.
    Refreshing,
}

/// Snapshot of the session generation, taken before a write that must not
/// outlive the session it was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionGeneration(u64);

type SharedRefresh = Shared<BoxFuture<'static, Result<AccessToken, RefreshError>>>;

/// The one in-flight refresh, tagged so only its own settlement clears it.
struct Flight {
    id: u64,
    outcome: SharedRefresh,
}

struct Inner<S, E> {
    store: S,
    endpoint: E,
    pending: Mutex<Option<Flight>>,
    next_flight_id: AtomicU64,
    /// Bumped whenever a session begins or ends, under both `writes` and
    /// `pending`. A flight reads it while registering itself in `pending`.
    generation: AtomicU64,
    /// Serializes every store write made on behalf of a session.
    writes: tokio::sync::Mutex<()>,
    refresh_calls: AtomicU64,
}

/// Single-flight access-token coordinator.
///
/// Construct once and share it (it is cheap to clone; clones share state).
pub struct TokenCoordinator<S, E> {
    inner: Arc<Inner<S, E>>,
}

impl<S, E> Clone for TokenCoordinator<S, E> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S, E> fmt::Debug for TokenCoordinator<S, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCoordinator")
            .field("state", &self.state())
            .field("refresh_calls", &self.refresh_count())
            .finish_non_exhaustive()
    }
}

impl<S, E> TokenCoordinator<S, E> {
    /// Returns whether a refresh is currently in flight.
    #[must_use]
    pub fn state(&self) -> RefreshState {
        if self.inner.lock_pending().is_some() {
            RefreshState::Refreshing
        } else {
            RefreshState::Idle
        }
    }

    /// Number of times the refresh endpoint has been invoked.
    #[must_use]
    pub fn refresh_count(&self) -> u64 {
        self.inner.refresh_calls.load(Ordering::SeqCst)
    }

    /// The credential store this coordinator writes to.
    #[must_use]
    pub fn store(&self) -> &S {
        &self.inner.store
    }

    /// The auth endpoint client this coordinator refreshes through.
    #[must_use]
    pub fn endpoint(&self) -> &E {
        &self.inner.endpoint
    }
}

impl<S, E> TokenCoordinator<S, E>
where
    S: CredentialStore + 'static,
    E: AuthEndpoint + 'static,
{
    /// Create a coordinator over a credential store and an endpoint client.
    pub fn new(store: S, endpoint: E) -> Self {
        Self {
            inner: Arc::new(Inner {
                store,
                endpoint,
                pending: Mutex::new(None),
                next_flight_id: AtomicU64::new(1),
                generation: AtomicU64::new(0),
                writes: tokio::sync::Mutex::new(()),
                refresh_calls: AtomicU64::new(0),
            }),
        }
    }

    /// Obtain a fresh access token from the backend.
    ///
    /// If a refresh is already in flight this awaits it instead of issuing
    /// another endpoint call. On success the new token and user are persisted
    /// before returning. On failure all local credentials are cleared and the
    /// same error is returned to every caller that joined this refresh.
    ///
    /// # Errors
    ///
    /// Returns [`RefreshError`] if the endpoint call fails, the result cannot
    /// be persisted, or the session ended while the refresh was in flight.
    pub async fn refresh_access_token(&self) -> Result<AccessToken, RefreshError> {
        let outcome = {
            let mut pending = self.inner.lock_pending();
            if let Some(flight) = pending.as_ref() {
                debug!(flight = flight.id, "refresh already in progress, waiting");
                flight.outcome.clone()
            } else {
                let id = self.inner.next_flight_id.fetch_add(1, Ordering::SeqCst);
                let started = self.inner.generation();
                let inner = Arc::clone(&self.inner);
                let outcome = async move {
                    let result = inner.perform_refresh(id, started).await;
                    inner.settle(id);
                    result
                }
                .boxed()
                .shared();
                *pending = Some(Flight {
                    id,
                    outcome: outcome.clone(),
                });
                outcome
            }
        };

        outcome.await
    }

    /// Return a token the server has just confirmed, or `None`.
    ///
    /// `None` means the caller must re-authenticate. No refresh is attempted
    /// when nothing is stored, since a refresh without a session cannot
    /// succeed. Otherwise every call re-validates through
    /// [`refresh_access_token`](Self::refresh_access_token); its failures are
    /// downgraded to `None`.
    pub async fn valid_token(&self) -> Option<AccessToken> {
        match self.inner.store.access_token().await {
            Ok(Some(_)) => {}
            Ok(None) => {
                debug!("no access token stored");
                return None;
            }
            Err(error) => {
                warn!(%error, "failed to read stored access token");
                return None;
            }
        }

        match self.refresh_access_token().await {
            Ok(token) => Some(token),
            Err(error) => {
                warn!(%error, "failed to obtain a valid token");
                None
            }
        }
    }

    /// Read the stored session, if both token and user are present.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store cannot be read.
    pub async fn current_session(&self) -> Result<Option<AuthSession>, StorageError> {
        self.inner.store.session().await
    }

    /// Persist a session obtained outside the coordinator (login, register).
    ///
    /// Any refresh still in flight for the previous session is detached and
    /// will not overwrite this one.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the session cannot be written.
    pub async fn begin_session(&self, session: &AuthSession) -> Result<(), StorageError> {
        let _writes = self.inner.writes.lock().await;
        self.inner.advance_generation();

        self.inner
            .store
            .set_access_token(&session.access_token)
            .await?;
        self.inner.store.set_user(&session.user).await?;
        info!(
            user = %session.user.user_id(),
            token = %session.access_token.preview(),
            "session started"
        );
        Ok(())
    }

    /// Clear local credentials and invalidate any in-flight refresh.
    ///
    /// Callers already waiting on that refresh receive
    /// [`RefreshError::SessionEnded`], and its result is never persisted.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the store could not be cleared; the
    /// caller should treat this as a failed logout and retry.
    pub async fn end_session(&self) -> Result<(), StorageError> {
        let _writes = self.inner.writes.lock().await;
        self.inner.advance_generation();

        self.inner.store.clear_all().await?;
        info!("session ended, credentials cleared");
        Ok(())
    }

    /// The current session generation.
    #[must_use]
    pub fn generation(&self) -> SessionGeneration {
        SessionGeneration(self.inner.generation())
    }

    /// Store `user` unless a session began or ended after `since` was taken.
    ///
    /// Returns `false` when the write was discarded.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the user record cannot be written.
    pub async fn update_user(
        &self,
        since: SessionGeneration,
        user: &UserRecord,
    ) -> Result<bool, StorageError> {
        let _writes = self.inner.writes.lock().await;
        if self.inner.generation() != since.0 {
            info!("session changed, discarding user update");
            return Ok(false);
        }
        self.inner.store.set_user(user).await?;
        Ok(true)
    }
}

impl<S, E> Inner<S, E> {
    fn lock_pending(&self) -> MutexGuard<'_, Option<Flight>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Empty the slot if it still holds the given flight.
    fn settle(&self, id: u64) {
        let mut pending = self.lock_pending();
        if pending.as_ref().is_some_and(|flight| flight.id == id) {
            *pending = None;
            debug!(flight = id, "refresh settled");
        }
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Start a new generation and detach the flight of the old one.
    fn advance_generation(&self) {
        let mut pending = self.lock_pending();
        self.generation.fetch_add(1, Ordering::SeqCst);
        if let Some(flight) = pending.take() {
            debug!(flight = flight.id, "detached in-flight refresh");
        }
    }
}

impl<S, E> Inner<S, E>
where
    S: CredentialStore,
    E: AuthEndpoint,
{
    async fn perform_refresh(&self, id: u64, started: u64) -> Result<AccessToken, RefreshError> {
        if self.generation() != started {
            debug!(flight = id, "session changed before refresh started");
            return Err(RefreshError::SessionEnded);
        }
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        info!(flight = id, "performing token refresh");

        match self.endpoint.refresh().await {
            Ok(session) => self.persist_refreshed(id, started, session).await,
            Err(error) => {
                warn!(flight = id, %error, "token refresh failed");
                self.fail_closed(id, started).await;
                Err(RefreshError::Auth(error))
            }
        }
    }

    async fn persist_refreshed(
        &self,
        id: u64,
        started: u64,
        session: AuthSession,
    ) -> Result<AccessToken, RefreshError> {
        let _writes = self.writes.lock().await;
        if self.generation() != started {
            info!(flight = id, "session changed during refresh, discarding result");
            return Err(RefreshError::SessionEnded);
        }

        let user = session.user.normalized();
        let stored = match self.store.set_access_token(&session.access_token).await {
            Ok(()) => self.store.set_user(&user).await,
            Err(error) => Err(error),
        };

        if let Err(error) = stored {
            warn!(flight = id, %error, "failed to persist refreshed credentials");
            self.clear_best_effort(id).await;
            return Err(RefreshError::Storage(error));
        }

        info!(
            flight = id,
            token = %session.access_token.preview(),
            "token refreshed successfully"
        );
        Ok(session.access_token)
    }

    async fn fail_closed(&self, id: u64, started: u64) {
        let _writes = self.writes.lock().await;
        if self.generation() != started {
            // A newer session owns the store now.
            return;
        }
        self.clear_best_effort(id).await;
    }

    async fn clear_best_effort(&self, id: u64) {
        match self.store.clear_all().await {
            Ok(()) => info!(flight = id, "credentials cleared"),
            Err(error) => warn!(flight = id, %error, "failed to clear credentials"),
        }
    }
}
