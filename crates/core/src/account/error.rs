use thiserror::Error;

/// Errors raised while validating account input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("Name cannot be empty")]
    EmptyName,
    #[error("Username cannot be empty")]
    EmptyUsername,
    #[error("Username and password are required")]
    MissingCredentials,
    #[error("New password and confirmation are required")]
    MissingPassword,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Unknown role: {0}")]
    UnknownRole(String),
}
