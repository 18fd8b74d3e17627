//! Payloads of the social API: newsflashes, friendships, groups, user
//! search and device registration.

mod device;
mod friendship;
mod group;
mod newsflash;
mod page;

pub use device::{DevicePlatform, RegisterDevice, RegisteredDevice};
pub use friendship::{
    AcceptFriendRequest, FriendRequestStatus, FriendsPage, FriendshipRequest, PendingRequestsPage,
    SendFriendRequest,
};
pub use group::{CreateGroup, Group, GroupUpdate, GroupsPage, InviteToGroup};
pub use newsflash::{CreateNewsflash, Newsflash, NewsflashPage, NewsflashTarget};
pub use page::{DEFAULT_PAGE_SIZE, PageRequest, Pagination, UserSearch, UsersPage};

use crate::error::DomainError;

/// Trims `value` and rejects it when nothing is left.
fn required(field: &str, value: impl Into<String>) -> Result<String, DomainError> {
    let value = value.into().trim().to_string();
    if value.is_empty() {
        return Err(DomainError::InvalidInput(format!("{field} is required")));
    }
    Ok(value)
}
