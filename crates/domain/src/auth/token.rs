//! Opaque bearer token.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// An opaque bearer credential issued by the backend.
///
/// The client holds no expiry information: a token is only known to be
/// valid when the server accepts it or a refresh has just produced it.
/// `Debug` and `Display` print a shortened preview so tokens never end up
/// verbatim in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wraps a raw token value.
    #[must_use]
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Wraps a raw token value, rejecting empty or whitespace-only input.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidToken`] if the value is blank.
    pub fn parse(value: impl Into<String>) -> DomainResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(DomainError::InvalidToken(
                "access token must not be empty".to_string(),
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw token value.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns the raw value.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Returns the `Authorization` header value for this token.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Returns a preview of the token (first 8 chars + `...`).
    #[must_use]
    pub fn preview(&self) -> String {
        if self.0.chars().count() > 12 {
            let head: String = self.0.chars().take(8).collect();
            format!("{head}...")
        } else {
            self.0.clone()
        }
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&self.preview()).finish()
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.preview())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_bearer_header() {
        let token = AccessToken::new("abc123");
        assert_eq!(token.bearer_header(), "Bearer abc123");
    }

    #[test]
    fn test_preview_truncates_long_tokens() {
        let token = AccessToken::new("abcdefghijklmnop");
        assert_eq!(token.preview(), "abcdefgh...");

        let token = AccessToken::new("short");
        assert_eq!(token.preview(), "short");
    }

    #[test]
    fn test_debug_does_not_leak_token() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiJ9.secret-payload");
        let debug = format!("{token:?}");
        assert!(!debug.contains("secret-payload"));
        assert!(debug.contains("eyJhbGci..."));
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(AccessToken::parse("").is_err());
        assert!(AccessToken::parse("   ").is_err());
        assert_eq!(AccessToken::parse("tok").unwrap().as_str(), "tok");
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let token = AccessToken::new("tok");
        assert_eq!(serde_json::to_string(&token).unwrap(), "\"tok\"");
    }
}
