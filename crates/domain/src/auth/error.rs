//! Authentication errors reported by the backend client.

use thiserror::Error;

/// Failure of an authentication endpoint call.
///
/// Cloneable so one refresh outcome can be handed to every waiting caller.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// The backend could not be reached (connect failure, timeout, broken body).
    #[error("network error: {message}")]
    Network {
        /// Error description.
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("{message}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the error body.
        message: String,
    },

    /// Success status, but the body lacked the expected fields.
    #[error("malformed response: {message}")]
    MalformedResponse {
        /// What was missing or unparseable.
        message: String,
    },

    /// No valid access token is available for an authenticated call.
    #[error("No valid access token available")]
    NotAuthenticated,
}

impl AuthError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a rejection error.
    pub fn rejected(status: u16, message: impl Into<String>) -> Self {
        Self::Rejected {
            status,
            message: message.into(),
        }
    }

    /// Creates a malformed-response error.
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Returns true for transport failures.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// Returns true if the backend explicitly refused the request.
    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected { .. })
    }

    /// Returns true if the failure means the user has to sign in again.
    #[must_use]
    pub const fn requires_login(&self) -> bool {
        matches!(
            self,
            Self::NotAuthenticated | Self::Rejected { status: 401 | 403, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_displays_backend_message() {
        let error = AuthError::rejected(401, "Invalid credentials");
        assert_eq!(error.to_string(), "Invalid credentials");
        assert!(error.is_rejected());
        assert!(error.requires_login());
    }

    #[test]
    fn test_classification() {
        assert!(AuthError::network("connection refused").is_network());
        assert!(!AuthError::malformed("missing user").requires_login());
        assert!(!AuthError::rejected(500, "boom").requires_login());
        assert!(AuthError::NotAuthenticated.requires_login());
    }
}
