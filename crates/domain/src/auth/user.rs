//! User record as returned by the backend.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier used when a record carries no usable id at all.
pub const UNKNOWN_USER_ID: &str = "unknown";

/// The authenticated user.
///
/// Replaced wholesale on every login, register and refresh; never patched
/// field by field. The legacy `_id`, `id` and `__v` fields come from older
/// backend versions and are kept only for identifier resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    /// Primary identifier.
    #[serde(default)]
    pub uuid: String,
    /// Login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Account creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last profile update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
    /// Legacy document identifier.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_object_id: Option<String>,
    /// Legacy identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Legacy document version.
    #[serde(rename = "__v", default, skip_serializing_if = "Option::is_none")]
    pub legacy_version: Option<u32>,
}

impl UserRecord {
    /// Creates a user record with the required fields only.
    #[must_use]
    pub fn new(
        uuid: impl Into<String>,
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            uuid: uuid.into(),
            username: username.into(),
            full_name: full_name.into(),
            email: email.into(),
            created_at: None,
            updated_at: None,
            legacy_object_id: None,
            id: None,
            legacy_version: None,
        }
    }

    /// Returns the resolved identifier of this user.
    #[must_use]
    pub fn user_id(&self) -> &str {
        resolve_user_id(self)
    }

    /// Returns a copy whose `uuid` holds the resolved identifier.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        let resolved = resolve_user_id(&self).to_string();
        self.uuid = resolved;
        self
    }

    /// Returns the name to show for this user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}

/// Resolves the identifier of a user record.
///
/// Order: `uuid`, then `id`, then `_id`; the first non-empty one wins.
/// Falls back to [`UNKNOWN_USER_ID`].
#[must_use]
pub fn resolve_user_id(user: &UserRecord) -> &str {
    [
        Some(user.uuid.as_str()),
        user.id.as_deref(),
        user.legacy_object_id.as_deref(),
    ]
    .into_iter()
    .flatten()
    .find(|candidate| !candidate.is_empty())
    .unwrap_or(UNKNOWN_USER_ID)
}
