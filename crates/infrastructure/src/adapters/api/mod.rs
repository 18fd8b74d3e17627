//! Typed clients for the social API.
//!
//! Each client borrows an [`AuthorizedClient`](super::AuthorizedClient), so
//! every call goes through the token coordinator and fails with
//! [`AuthError::NotAuthenticated`](friendlines_domain::AuthError::NotAuthenticated)
//! without sending anything when no valid token can be obtained.

mod friendships;
mod groups;
mod newsflashes;
mod notifications;
mod users;

pub use friendships::FriendshipsApi;
pub use groups::GroupsApi;
pub use newsflashes::NewsflashesApi;
pub use notifications::NotificationsApi;
pub use users::UsersApi;
