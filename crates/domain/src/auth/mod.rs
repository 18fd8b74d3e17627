//! Authentication domain types

mod credentials;
mod error;
mod token;
mod user;

pub use credentials::{AuthSession, LoginCredentials, RegisterCredentials};
pub use error::AuthError;
pub use token::AccessToken;
pub use user::{UNKNOWN_USER_ID, UserRecord, resolve_user_id};
