//! Friendlines Application - Token coordination, use cases and ports
//!
//! This crate defines the application layer with:
//! - Port traits (credential store, auth endpoint, file system)
//! - The single-flight [`TokenCoordinator`]
//! - Session use cases (login, register, logout, current user, restore)
//! - Application-level error handling

pub mod auth;
pub mod error;
pub mod ports;
pub mod use_cases;

pub use auth::{
    InMemoryCredentialStore, RefreshError, RefreshState, SessionGeneration, TokenCoordinator,
};
pub use error::{ApplicationError, ApplicationResult};
pub use ports::{AuthEndpoint, CredentialStore, FileSystem, FileSystemError, StorageError};
pub use use_cases::{FetchCurrentUser, Login, Logout, LogoutOutput, Register, RestoreSession};
