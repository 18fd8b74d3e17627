//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and external systems.
//! Each port is a trait that can be implemented by adapters in the infrastructure layer.

mod auth_endpoint;
mod credential_store;
mod file_system;

pub use auth_endpoint::AuthEndpoint;
pub use credential_store::{CredentialStore, StorageError};
pub use file_system::{FileSystem, FileSystemError};
