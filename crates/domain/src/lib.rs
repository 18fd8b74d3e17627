//! Friendlines Domain - Core types
//!
//! This crate defines the authentication model of the Friendlines client
//! and the payloads of the social API it calls.
//! All types here are pure Rust with no I/O dependencies.

pub mod auth;
pub mod envelope;
pub mod error;
pub mod social;

pub use auth::{
    AccessToken, AuthError, AuthSession, LoginCredentials, RegisterCredentials, UNKNOWN_USER_ID,
    UserRecord, resolve_user_id,
};
pub use envelope::ApiEnvelope;
pub use error::{DomainError, DomainResult};
pub use social::{
    AcceptFriendRequest, CreateGroup, CreateNewsflash, DEFAULT_PAGE_SIZE, DevicePlatform,
    FriendRequestStatus, FriendsPage, FriendshipRequest, Group, GroupUpdate, GroupsPage,
    InviteToGroup, Newsflash, NewsflashPage, NewsflashTarget, PageRequest, Pagination,
    PendingRequestsPage, RegisterDevice, RegisteredDevice, SendFriendRequest, UserSearch,
    UsersPage,
};
