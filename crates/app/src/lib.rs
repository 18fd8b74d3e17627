//! Friendlines command-line client.
//!
//! Commands share one [`AppContext`]: a file-backed credential store, the
//! reqwest auth client with a persisted session cookie, and the token
//! coordinator over both.

pub mod cli;
pub mod context;
pub mod social;

pub use cli::{Cli, Commands};
pub use context::AppContext;
