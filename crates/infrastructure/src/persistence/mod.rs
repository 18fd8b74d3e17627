//! File-backed persistence adapters.

mod file_credential_store;
mod file_system;
mod session_cookies;

pub use file_credential_store::FileCredentialStore;
pub use file_system::TokioFileSystem;
pub use session_cookies::SessionCookieFile;
