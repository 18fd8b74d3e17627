//! Push notification device registration.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Platform of a push device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DevicePlatform {
    /// Apple iOS.
    Ios,
    /// Android.
    Android,
    /// Browser push.
    Web,
}

impl FromStr for DevicePlatform {
    type Err = DomainError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "ios" => Ok(Self::Ios),
            "android" => Ok(Self::Android),
            "web" => Ok(Self::Web),
            other => Err(DomainError::InvalidInput(format!(
                "unknown platform '{other}' (expected ios, android or web)"
            ))),
        }
    }
}

/// Body of `POST /notifications/register-device`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDevice {
    device_token: String,
    platform: DevicePlatform,
}

impl RegisterDevice {
    /// Registers the push token of one device.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidInput`] if the token is blank.
    pub fn new(device_token: impl Into<String>, platform: DevicePlatform) -> DomainResult<Self> {
        Ok(Self {
            device_token: super::required("device token", device_token)?,
            platform,
        })
    }
}

/// Registration acknowledged by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisteredDevice {
    /// Registration id.
    pub id: String,
    /// Platform as echoed by the backend.
    pub platform: String,
}
