//! Groups and group membership.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Pagination;
use crate::error::{DomainError, DomainResult};

/// A group of users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    /// Backend document id.
    #[serde(rename = "_id")]
    pub id: String,
    /// Display name.
    pub name: String,
    /// Optional free text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// User who created the group.
    pub creator_id: String,
    /// Member user ids.
    #[serde(default)]
    pub members: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Body of `POST /groups/create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreateGroup {
    name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl CreateGroup {
    /// Creates a group named `name`. A blank description is dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if the name is blank.
    pub fn new(name: impl Into<String>, description: Option<String>) -> DomainResult<Self> {
        Ok(Self {
            name: super::required("group name", name)?,
            description: non_blank(description),
        })
    }
}

/// Body of `PUT /groups/{id}`; only the fields set are changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GroupUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
}

impl GroupUpdate {
    /// Builds a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if nothing would change or the
    /// new name is blank.
    pub fn new(name: Option<String>, description: Option<String>) -> DomainResult<Self> {
        let name = name.map(|name| super::required("group name", name)).transpose()?;
        if name.is_none() && description.is_none() {
            return Err(DomainError::InvalidInput(
                "a group update needs a name or a description".to_string(),
            ));
        }
        Ok(Self { name, description })
    }
}

/// Body of `POST /groups/invite`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InviteToGroup {
    group_id: String,
    invited_user_id: String,
}

impl InviteToGroup {
    /// Invites `invited_user_id` into `group_id`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if either id is blank.
    pub fn new(
        group_id: impl Into<String>,
        invited_user_id: impl Into<String>,
    ) -> DomainResult<Self> {
        Ok(Self {
            group_id: super::required("group id", group_id)?,
            invited_user_id: super::required("invited user id", invited_user_id)?,
        })
    }
}

/// One page of the caller's groups.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupsPage {
    /// Groups on this page.
    pub groups: Vec<Group>,
    /// Paging state.
    pub pagination: Pagination,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_create_group_drops_blank_description() {
        let body = CreateGroup::new("Climbing", Some("  ".to_string())).unwrap();
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({ "name": "Climbing" }));
        assert!(CreateGroup::new("", None).is_err());
    }

    #[test]
    fn test_group_update_is_partial() {
        let update = GroupUpdate::new(None, Some("Weekend trips".to_string())).unwrap();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({ "description": "Weekend trips" })
        );
        assert!(GroupUpdate::new(None, None).is_err());
        assert!(GroupUpdate::new(Some(" ".to_string()), None).is_err());
    }

    #[test]
    fn test_invite_body() {
        let invite = InviteToGroup::new("g-1", "u-7").unwrap();
        assert_eq!(
            serde_json::to_value(&invite).unwrap(),
            json!({ "groupId": "g-1", "invitedUserId": "u-7" })
        );
    }

    #[test]
    fn test_group_without_description() {
        let group: Group = serde_json::from_value(json!({
            "_id": "g-1", "name": "Climbing", "creatorId": "u-1", "members": ["u-1", "u-2"]
        }))
        .unwrap();
        assert_eq!(group.description, None);
        assert_eq!(group.members.len(), 2);
    }
}
