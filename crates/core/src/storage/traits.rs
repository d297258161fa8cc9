use async_trait::async_trait;

use crate::account::{User, UserId, UserInput, UserRecord};

use super::Result;

/// Persistence for user accounts.
///
/// Implemented once per backend; the storage facade holds whichever one was
/// selected at startup.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Stores a new user under a freshly allocated id.
    async fn create_user(&self, input: &UserInput) -> Result<User>;

    /// Lists all users, most recently created first.
    async fn list_users(&self) -> Result<Vec<User>>;

    /// Gets a user by id.
    async fn get_user(&self, id: UserId) -> Result<Option<User>>;

    /// Gets a user by username, including the password.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>>;

    /// Gets the user whose username and password both match exactly.
    async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<User>>;

    /// Overwrites every field of an existing user.
    async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User>;

    /// Removes a user. Missing ids are not an error.
    async fn delete_user(&self, id: UserId) -> Result<()>;
}

/// String-keyed blob storage.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Gets the value stored under a key.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Stores a value, replacing any previous one.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Removes a key. Missing keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
