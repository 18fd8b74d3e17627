//! Friendlines Infrastructure - Adapters and implementations
//!
//! This crate provides concrete implementations of the ports
//! defined in the application layer:
//! - [`ReqwestAuthClient`] for the backend auth endpoints
//! - [`FileCredentialStore`] over [`TokioFileSystem`]
//! - [`AuthorizedClient`] for bearer-authenticated API calls, with typed
//!   clients for newsflashes, friendships, groups, users and notifications
//! - [`ClientConfig`] loading

pub mod adapters;
pub mod config;
pub mod persistence;
pub mod serialization;

pub use adapters::api::{FriendshipsApi, GroupsApi, NewsflashesApi, NotificationsApi, UsersApi};
pub use adapters::{AuthorizedClient, ReqwestAuthClient};
pub use crate::config::{ClientConfig, ConfigError};
pub use persistence::{FileCredentialStore, SessionCookieFile, TokioFileSystem};
pub use serialization::{SerializationError, from_json_bytes, to_json_stable_bytes};
