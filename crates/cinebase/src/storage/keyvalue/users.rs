//! User store kept as one serialized list under a single key.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, warn};

use cinebase_core::account::{next_user_id, User, UserId, UserInput, UserRecord};
use cinebase_core::storage::{
    deserialize_users, serialize_users, KeyValueStore, RepositoryError, Result, UserStore,
    USERS_KEY,
};

/// User store on top of any [`KeyValueStore`].
///
/// All records live in one JSON array under [`USERS_KEY`], newest first.
/// Every change rewrites the whole array.
pub struct KeyValueUserStore {
    store: Arc<dyn KeyValueStore>,
    /// Serializes read-modify-write cycles on the list.
    write_lock: Mutex<()>,
}

impl KeyValueUserStore {
    /// Creates a user store over the given key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// Reads the list. Absent or corrupt content reads as empty.
    async fn read_users(&self) -> Result<Vec<UserRecord>> {
        let Some(raw) = self.store.get(USERS_KEY).await? else {
            return Ok(Vec::new());
        };

        match deserialize_users(&raw) {
            Ok(users) => Ok(users),
            Err(e) => {
                warn!(key = USERS_KEY, error = %e, "Treating corrupt user list as empty");
                Ok(Vec::new())
            }
        }
    }

    async fn write_users(&self, users: &[UserRecord]) -> Result<()> {
        let raw = serialize_users(users)?;
        self.store.set(USERS_KEY, &raw).await
    }
}

#[async_trait]
impl UserStore for KeyValueUserStore {
    async fn create_user(&self, input: &UserInput) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.read_users().await?;

        if users.iter().any(|u| u.username == input.username) {
            return Err(RepositoryError::username_taken(&input.username));
        }

        let record = input.clone().into_record(next_user_id(&users));
        let user = record.public();
        users.insert(0, record);
        self.write_users(&users).await?;

        debug!(id = user.id, username = %user.username, "Created user");
        Ok(user)
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        let users = self.read_users().await?;
        Ok(users.into_iter().map(User::from).collect())
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        let users = self.read_users().await?;
        Ok(users.into_iter().find(|u| u.id == id).map(User::from))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let users = self.read_users().await?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let users = self.read_users().await?;
        Ok(users
            .into_iter()
            .find(|u| u.matches_credentials(username, password))
            .map(User::from))
    }

    async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.read_users().await?;

        let idx = users
            .iter()
            .position(|u| u.id == id)
            .ok_or_else(|| RepositoryError::user_not_found(id))?;

        if users
            .iter()
            .any(|u| u.id != id && u.username == input.username)
        {
            return Err(RepositoryError::username_taken(&input.username));
        }

        users[idx] = input.clone().into_record(id);
        let user = users[idx].public();
        self.write_users(&users).await?;

        debug!(id, "Updated user");
        Ok(user)
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        let mut users = self.read_users().await?;
        users.retain(|u| u.id != id);
        self.write_users(&users).await?;

        debug!(id, "Deleted user");
        Ok(())
    }
}
