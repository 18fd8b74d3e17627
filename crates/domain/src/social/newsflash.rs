//! Newsflashes: short posts shared with friends or with a group.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Pagination;
use crate::auth::UserRecord;
use crate::error::DomainResult;

/// Audience of a newsflash.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NewsflashTarget {
    /// Every friend of the author.
    Friends,
    /// The members of one group (`targetId`).
    Group,
}

/// A newsflash as stored by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Newsflash {
    /// Backend document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Resolved id of the author.
    pub author_id: String,
    /// Post text.
    pub content: String,
    /// Audience kind.
    pub target_type: NewsflashTarget,
    /// Group id when the audience is a group.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
    /// Soft-delete flag.
    #[serde(default)]
    pub is_deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Author profile; present in feeds, absent on create.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRecord>,
}

/// Body of `POST /newsflashes/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateNewsflash {
    content: String,
    target_type: NewsflashTarget,
    #[serde(skip_serializing_if = "Option::is_none")]
    target_id: Option<String>,
}

impl CreateNewsflash {
    /// A newsflash for all friends.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`](crate::DomainError::InvalidInput)
    /// if the content is blank.
    pub fn to_friends(content: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            content: super::required("content", content)?,
            target_type: NewsflashTarget::Friends,
            target_id: None,
        })
    }

    /// A newsflash for one group.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`](crate::DomainError::InvalidInput)
    /// if the content or the group id is blank.
    pub fn to_group(content: impl Into<String>, group_id: impl Into<String>) -> DomainResult<Self> {
        Ok(Self {
            content: super::required("content", content)?,
            target_type: NewsflashTarget::Group,
            target_id: Some(super::required("group id", group_id)?),
        })
    }

    /// The post text.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The audience kind.
    #[must_use]
    pub const fn target_type(&self) -> NewsflashTarget {
        self.target_type
    }
}

/// One page of a newsflash feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsflashPage {
    /// Newest first.
    pub newsflashes: Vec<Newsflash>,
    /// Paging state.
    pub pagination: Pagination,
}
