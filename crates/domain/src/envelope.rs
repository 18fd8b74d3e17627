//! Backend success envelope: `{ "success": true, "data": { ... } }`.

use serde::{Deserialize, Serialize};

use crate::auth::AuthError;

/// Response envelope wrapping every successful backend payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    /// Whether the backend reports success.
    #[serde(default)]
    pub success: bool,
    /// The payload, present on success.
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwraps the payload.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::MalformedResponse`] if `success` is false or
    /// `data` is missing.
    pub fn into_data(self) -> Result<T, AuthError> {
        if !self.success {
            return Err(AuthError::malformed("envelope reports success: false"));
        }
        self.data
            .ok_or_else(|| AuthError::malformed("envelope has no data"))
    }
}
