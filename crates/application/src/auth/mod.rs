//! Authentication module for the Friendlines client.
//!
//! This module provides:
//! - The single-flight access-token coordinator
//! - In-memory credential storage

mod coordinator;
mod memory_store;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, dead_code)]
pub(crate) mod testing;

pub use coordinator::{RefreshError, RefreshState, SessionGeneration, TokenCoordinator};
pub use memory_store::InMemoryCredentialStore;
