//! Login/register payloads and the session they produce.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{AccessToken, UserRecord};
use crate::error::{DomainError, DomainResult};

/// Username/password pair sent to the login endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginCredentials {
    /// Username (the app also accepts an email here).
    pub username: String,
    /// Plain-text password.
    pub password: String,
}

impl LoginCredentials {
    /// Creates login credentials.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] if either field is blank.
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> DomainResult<Self> {
        let username = username.into().trim().to_string();
        let password = password.into();
        if username.is_empty() {
            return Err(DomainError::InvalidCredentials(
                "username is required".to_string(),
            ));
        }
        if password.is_empty() {
            return Err(DomainError::InvalidCredentials(
                "password is required".to_string(),
            ));
        }
        Ok(Self { username, password })
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Account details sent to the registration endpoint.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterCredentials {
    /// Desired login name.
    pub username: String,
    /// Display name.
    pub full_name: String,
    /// Email address.
    pub email: String,
    /// Plain-text password.
    pub password: String,
}

impl RegisterCredentials {
    /// Creates registration details.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidCredentials`] if a field is blank or the
    /// email has no `@`.
    pub fn new(
        username: impl Into<String>,
        full_name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> DomainResult<Self> {
        let credentials = Self {
            username: username.into().trim().to_string(),
            full_name: full_name.into().trim().to_string(),
            email: email.into().trim().to_string(),
            password: password.into(),
        };

        for (field, value) in [
            ("username", &credentials.username),
            ("full name", &credentials.full_name),
            ("email", &credentials.email),
            ("password", &credentials.password),
        ] {
            if value.is_empty() {
                return Err(DomainError::InvalidCredentials(format!(
                    "{field} is required"
                )));
            }
        }
        if !credentials.email.contains('@') {
            return Err(DomainError::InvalidCredentials(format!(
                "invalid email address: {}",
                credentials.email
            )));
        }

        Ok(credentials)
    }
}

impl fmt::Debug for RegisterCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisterCredentials")
            .field("username", &self.username)
            .field("full_name", &self.full_name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// An authenticated session: the user and their current access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    /// The authenticated user.
    pub user: UserRecord,
    /// Bearer token for authenticated calls.
    pub access_token: AccessToken,
}

impl AuthSession {
    /// Creates a session; the user record is normalized on the way in.
    #[must_use]
    pub fn new(user: UserRecord, access_token: AccessToken) -> Self {
        Self {
            user: user.normalized(),
            access_token,
        }
    }
}
