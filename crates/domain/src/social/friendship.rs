//! Friend requests and friend lists.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Pagination;
use crate::auth::UserRecord;
use crate::error::DomainResult;

/// State of a friend request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FriendRequestStatus {
    /// Awaiting the recipient.
    Pending,
    /// The users are friends.
    Accepted,
    /// Declined by the recipient.
    Rejected,
}

/// A friend request between two users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendshipRequest {
    /// Request id, as expected by [`AcceptFriendRequest`].
    #[serde(rename = "_id")]
    pub id: String,
    /// Sender.
    pub user1_id: String,
    /// Recipient.
    pub user2_id: String,
    /// Request state.
    pub status: FriendRequestStatus,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last state change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /friendships/request`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendFriendRequest {
    friend_id: String,
}

impl SendFriendRequest {
    /// Asks `friend_id` to become a friend.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`](crate::DomainError::InvalidInput)
    /// if the id is blank.
    pub fn new(friend_id: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            friend_id: super::required("friend id", friend_id)?,
        })
    }
}

/// Body of `POST /friendships/accept`. Carries the request id, not a user id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptFriendRequest {
    request_id: String,
}

impl AcceptFriendRequest {
    /// Accepts the friend request `request_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`](crate::DomainError::InvalidInput)
    /// if the id is blank.
    pub fn new(request_id: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            request_id: super::required("request id", request_id)?,
        })
    }
}

/// One page of the friends list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendsPage {
    /// Friends on this page.
    pub friends: Vec<UserRecord>,
    /// Paging state.
    pub pagination: Pagination,
}

/// One page of incoming friend requests, listed by sender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequestsPage {
    /// Senders of the pending requests.
    pub requests: Vec<UserRecord>,
    /// Paging state.
    pub pagination: Pagination,
}
