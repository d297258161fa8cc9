use thiserror::Error;

use crate::account::AccountError;

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Backend unavailable: {0}")]
    BackendUnavailable(String),
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },
    #[error("{entity_type} already exists: {id}")]
    AlreadyExists {
        entity_type: &'static str,
        id: String,
    },
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
    #[error("Serialization error: {0}")]
    Serialization(String),
    #[error("Query failed: {0}")]
    QueryFailed(String),
    #[error("Storage error: {0}")]
    Storage(String),
}

impl RepositoryError {
    /// Shorthand for a missing user.
    pub fn user_not_found(id: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "User",
            id: id.to_string(),
        }
    }

    /// Shorthand for a taken username.
    pub fn username_taken(username: impl Into<String>) -> Self {
        Self::AlreadyExists {
            entity_type: "User",
            id: username.into(),
        }
    }
}

impl From<AccountError> for RepositoryError {
    fn from(err: AccountError) -> Self {
        Self::InvalidData(err.to_string())
    }
}

/// Result type for repository operations.
pub type Result<T> = std::result::Result<T, RepositoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_not_found_display() {
        let error = RepositoryError::user_not_found(42);
        assert_eq!(error.to_string(), "User not found: 42");
    }

    #[test]
    fn test_repository_error_already_exists_display() {
        let error = RepositoryError::username_taken("bob");
        assert_eq!(error.to_string(), "User already exists: bob");
    }

    #[test]
    fn test_repository_error_backend_unavailable_display() {
        let error = RepositoryError::BackendUnavailable("no database path".to_string());
        assert_eq!(error.to_string(), "Backend unavailable: no database path");
    }

    #[test]
    fn test_repository_error_invalid_operation_display() {
        let error = RepositoryError::InvalidOperation("cannot delete yourself".to_string());
        assert_eq!(error.to_string(), "Invalid operation: cannot delete yourself");
    }

    #[test]
    fn test_repository_error_serialization_display() {
        let error = RepositoryError::Serialization("expected value".to_string());
        assert_eq!(error.to_string(), "Serialization error: expected value");
    }

    #[test]
    fn test_account_error_maps_to_invalid_data() {
        let error: RepositoryError = AccountError::PasswordMismatch.into();
        assert_eq!(
            error,
            RepositoryError::InvalidData("Passwords do not match".to_string())
        );
    }
}
