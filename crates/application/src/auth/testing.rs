//! Test doubles for the auth ports.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use friendlines_domain::{
    AccessToken, AuthError, AuthSession, LoginCredentials, RegisterCredentials, UserRecord,
};
use tokio::sync::Notify;

use super::InMemoryCredentialStore;
use crate::ports::{AuthEndpoint, CredentialStore, StorageError};

pub fn sample_user() -> UserRecord {
    UserRecord::new("test-uuid", "testuser", "Test User", "test@example.com")
}

pub fn sample_session(token: &str) -> AuthSession {
    AuthSession::new(sample_user(), AccessToken::new(token))
}

/// Endpoint double returning scripted outcomes and counting calls.
///
/// Every call yields once before answering so that concurrent callers get a
/// chance to join an in-flight refresh. A gated endpoint additionally blocks
/// refresh until [`release`](Self::release) is called.
pub struct ScriptedEndpoint {
    refresh_outcome: Mutex<Result<AuthSession, AuthError>>,
    login_outcome: Mutex<Result<AuthSession, AuthError>>,
    logout_outcome: Mutex<Result<(), AuthError>>,
    refresh_calls: AtomicUsize,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    current_user_calls: AtomicUsize,
    gated: bool,
    entered: Notify,
    gate: Notify,
}

impl ScriptedEndpoint {
    fn with_refresh(outcome: Result<AuthSession, AuthError>) -> Self {
        Self {
            refresh_outcome: Mutex::new(outcome),
            login_outcome: Mutex::new(Ok(sample_session("login-token"))),
            logout_outcome: Mutex::new(Ok(())),
            refresh_calls: AtomicUsize::new(0),
            login_calls: AtomicUsize::new(0),
            logout_calls: AtomicUsize::new(0),
            current_user_calls: AtomicUsize::new(0),
            gated: false,
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    pub fn succeeding(token: &str) -> Self {
        Self::with_refresh(Ok(sample_session(token)))
    }

    pub fn failing(error: AuthError) -> Self {
        Self::with_refresh(Err(error))
    }

    #[must_use]
    pub fn gated(mut self) -> Self {
        self.gated = true;
        self
    }

    pub fn respond_with(&self, outcome: Result<AuthSession, AuthError>) {
        *self.refresh_outcome.lock().unwrap() = outcome;
    }

    pub fn login_responds_with(&self, outcome: Result<AuthSession, AuthError>) {
        *self.login_outcome.lock().unwrap() = outcome;
    }

    pub fn logout_responds_with(&self, outcome: Result<(), AuthError>) {
        *self.logout_outcome.lock().unwrap() = outcome;
    }

    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }

    pub fn refresh_calls(&self) -> usize {
        self.refresh_calls.load(Ordering::SeqCst)
    }

    pub fn login_calls(&self) -> usize {
        self.login_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    pub fn current_user_calls(&self) -> usize {
        self.current_user_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl AuthEndpoint for ScriptedEndpoint {
    async fn login(&self, _credentials: &LoginCredentials) -> Result<AuthSession, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.login_outcome.lock().unwrap().clone()
    }

    async fn register(
        &self,
        _credentials: &RegisterCredentials,
    ) -> Result<AuthSession, AuthError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        self.login_outcome.lock().unwrap().clone()
    }

    async fn refresh(&self) -> Result<AuthSession, AuthError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_one();
        if self.gated {
            self.gate.notified().await;
        } else {
            tokio::task::yield_now().await;
        }
        self.refresh_outcome.lock().unwrap().clone()
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.logout_outcome.lock().unwrap().clone()
    }

    async fn current_user(&self, _token: &AccessToken) -> Result<UserRecord, AuthError> {
        self.current_user_calls.fetch_add(1, Ordering::SeqCst);
        let mut user = sample_user();
        user.full_name = "Test User (profile)".to_string();
        Ok(user)
    }
}

/// Store double whose writes or clears can be switched to fail.
pub struct FlakyStore {
    inner: InMemoryCredentialStore,
    fail_writes: AtomicBool,
    fail_clear: AtomicBool,
}

impl FlakyStore {
    pub fn with_session(token: AccessToken, user: UserRecord) -> Self {
        Self {
            inner: InMemoryCredentialStore::with_session(token, user),
            fail_writes: AtomicBool::new(false),
            fail_clear: AtomicBool::new(false),
        }
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_clear(&self, fail: bool) {
        self.fail_clear.store(fail, Ordering::SeqCst);
    }

    fn check(flag: &AtomicBool) -> Result<(), StorageError> {
        if flag.load(Ordering::SeqCst) {
            Err(StorageError::io("disk full"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CredentialStore for FlakyStore {
    async fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        self.inner.access_token().await
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        Self::check(&self.fail_writes)?;
        self.inner.set_access_token(token).await
    }

    async fn user(&self) -> Result<Option<UserRecord>, StorageError> {
        self.inner.user().await
    }

    async fn set_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        Self::check(&self.fail_writes)?;
        self.inner.set_user(user).await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        Self::check(&self.fail_clear)?;
        self.inner.clear_all().await
    }
}

/// Store double whose `set_user` can be held until [`release`](Self::release).
pub struct GatedStore {
    inner: InMemoryCredentialStore,
    gate_user_writes: AtomicBool,
    entered: Notify,
    gate: Notify,
}

impl GatedStore {
    pub fn with_session(token: AccessToken, user: UserRecord) -> Self {
        Self {
            inner: InMemoryCredentialStore::with_session(token, user),
            gate_user_writes: AtomicBool::new(false),
            entered: Notify::new(),
            gate: Notify::new(),
        }
    }

    pub fn gate_user_writes(&self, gated: bool) {
        self.gate_user_writes.store(gated, Ordering::SeqCst);
    }

    pub async fn wait_until_entered(&self) {
        self.entered.notified().await;
    }

    pub fn release(&self) {
        self.gate.notify_one();
    }
}

#[async_trait]
impl CredentialStore for GatedStore {
    async fn access_token(&self) -> Result<Option<AccessToken>, StorageError> {
        self.inner.access_token().await
    }

    async fn set_access_token(&self, token: &AccessToken) -> Result<(), StorageError> {
        self.inner.set_access_token(token).await
    }

    async fn user(&self) -> Result<Option<UserRecord>, StorageError> {
        self.inner.user().await
    }

    async fn set_user(&self, user: &UserRecord) -> Result<(), StorageError> {
        if self.gate_user_writes.swap(false, Ordering::SeqCst) {
            self.entered.notify_one();
            self.gate.notified().await;
        }
        self.inner.set_user(user).await
    }

    async fn clear_all(&self) -> Result<(), StorageError> {
        self.inner.clear_all().await
    }
}
