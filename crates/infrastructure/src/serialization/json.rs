//! JSON encoding of the files the client writes.
//!
//! Files are pretty-printed with a trailing newline so they diff cleanly and
//! stay readable when inspected by hand.

use friendlines_application::ports::StorageError;
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Error type for file encoding.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// The value could not be encoded.
    #[error("failed to encode JSON: {0}")]
    Encode(#[source] serde_json::Error),

    /// The file content is not the expected JSON document.
    #[error("failed to decode JSON: {0}")]
    Decode(#[source] serde_json::Error),
}

impl From<SerializationError> for StorageError {
    fn from(error: SerializationError) -> Self {
        Self::serialization(error.to_string())
    }
}

/// Encodes a value as pretty-printed JSON followed by a newline.
///
/// # Errors
///
/// Returns [`SerializationError::Encode`] if the value cannot be represented as JSON.
pub fn to_json_stable_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut bytes = serde_json::to_vec_pretty(value).map_err(SerializationError::Encode)?;
    bytes.push(b'\n');
    Ok(bytes)
}

/// Decodes a JSON document.
///
/// # Errors
///
/// Returns [`SerializationError::Decode`] if the bytes are not valid JSON for `T`.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Decode)
}
