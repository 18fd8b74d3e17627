//! Application use cases (session flows built on the token coordinator).

mod current_user;
mod login;
mod logout;
mod register;
mod restore_session;

pub use current_user::*;
pub use login::*;
pub use logout::*;
pub use register::*;
pub use restore_session::*;
