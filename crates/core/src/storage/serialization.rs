//! Pure functions for encoding stored blobs as JSON text.

use crate::account::{User, UserRecord};

use super::{RepositoryError, Result};

/// Serializes the user list blob.
pub fn serialize_users(users: &[UserRecord]) -> Result<String> {
    serde_json::to_string(users).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Deserializes the user list blob.
pub fn deserialize_users(raw: &str) -> Result<Vec<UserRecord>> {
    serde_json::from_str(raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Serializes the session blob.
pub fn serialize_session(user: &User) -> Result<String> {
    serde_json::to_string(user).map_err(|e| RepositoryError::Serialization(e.to_string()))
}

/// Deserializes the session blob.
pub fn deserialize_session(raw: &str) -> Result<User> {
    serde_json::from_str(raw).map_err(|e| RepositoryError::Serialization(e.to_string()))
}
