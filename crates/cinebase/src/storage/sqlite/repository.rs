//! SQLite user store.
//!
//! Implements `UserStore` from `cinebase_core::storage` on top of a single
//! `users` table. Each call runs in its own transaction on the connection's
//! background thread.

use std::path::Path;

use async_trait::async_trait;
use tokio_rusqlite::Connection;

use cinebase_core::account::{User, UserId, UserInput, UserRecord};
use cinebase_core::storage::{RepositoryError, Result, UserStore};

use super::conversions::{row_to_user, row_to_user_record};
use super::error::{map_open_error, map_tokio_rusqlite_error};
use super::schema;

/// Helper to wrap rusqlite errors for tokio_rusqlite closures.
fn wrap_err(e: rusqlite::Error) -> tokio_rusqlite::Error {
    tokio_rusqlite::Error::Rusqlite(e)
}

/// SQLite-based user store.
pub struct SqliteUserStore {
    conn: Connection,
}

impl SqliteUserStore {
    /// Opens (or creates) a database file and prepares the schema.
    ///
    /// Any failure is reported as `RepositoryError::BackendUnavailable` so the
    /// caller can fall back to another backend.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .await
            .map_err(map_open_error)?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    /// Creates a store backed by an in-memory database.
    ///
    /// Useful for testing - data is lost when the connection is dropped.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()
            .await
            .map_err(map_open_error)?;

        Self::init_schema(&conn).await?;

        Ok(Self { conn })
    }

    async fn init_schema(conn: &Connection) -> Result<()> {
        conn.call(|conn| {
            let tx = conn.transaction().map_err(wrap_err)?;
            tx.execute_batch(schema::CREATE_TABLES).map_err(wrap_err)?;
            tx.commit().map_err(wrap_err)?;
            Ok(())
        })
        .await
        .map_err(|e| RepositoryError::BackendUnavailable(e.to_string()))
    }
}

#[async_trait]
impl UserStore for SqliteUserStore {
    async fn create_user(&self, input: &UserInput) -> Result<User> {
        let name = input.name.clone();
        let username = input.username.clone();
        let password = input.password.clone();
        let role = input.role;

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(
                    schema::INSERT_USER,
                    rusqlite::params![name, username, password, role.as_str()],
                )
                .map_err(wrap_err)?;
                let id = tx.last_insert_rowid();
                tx.commit().map_err(wrap_err)?;
                Ok(User {
                    id,
                    name,
                    username,
                    role,
                })
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", input.username.clone()))
    }

    async fn list_users(&self) -> Result<Vec<User>> {
        self.conn
            .call(|conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let users = {
                    let mut stmt = tx.prepare(schema::SELECT_USERS).map_err(wrap_err)?;
                    let rows = stmt.query_map([], row_to_user).map_err(wrap_err)?;

                    let mut users = Vec::new();
                    for row_result in rows {
                        users.push(row_result.map_err(wrap_err)?);
                    }
                    users
                };
                tx.commit().map_err(wrap_err)?;
                Ok(users)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", "*"))
    }

    async fn get_user(&self, id: UserId) -> Result<Option<User>> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let user = match tx.query_row(schema::SELECT_USER_BY_ID, [id], row_to_user) {
                    Ok(user) => Some(user),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(wrap_err(e)),
                };
                tx.commit().map_err(wrap_err)?;
                Ok(user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        let username_owned = username.to_string();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let record = match tx.query_row(
                    schema::SELECT_USER_RECORD_BY_USERNAME,
                    [&username_owned],
                    row_to_user_record,
                ) {
                    Ok(record) => Some(record),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(wrap_err(e)),
                };
                tx.commit().map_err(wrap_err)?;
                Ok(record)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", username))
    }

    async fn find_by_credentials(&self, username: &str, password: &str) -> Result<Option<User>> {
        let username_owned = username.to_string();
        let password = password.to_string();

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let user = match tx.query_row(
                    schema::SELECT_USER_BY_CREDENTIALS,
                    [&username_owned, &password],
                    row_to_user,
                ) {
                    Ok(user) => Some(user),
                    Err(rusqlite::Error::QueryReturnedNoRows) => None,
                    Err(e) => return Err(wrap_err(e)),
                };
                tx.commit().map_err(wrap_err)?;
                Ok(user)
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", username))
    }

    async fn update_user(&self, id: UserId, input: &UserInput) -> Result<User> {
        let name = input.name.clone();
        let username = input.username.clone();
        let password = input.password.clone();
        let role = input.role;

        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                let rows = tx
                    .execute(
                        schema::UPDATE_USER,
                        rusqlite::params![id, name, username, password, role.as_str()],
                    )
                    .map_err(wrap_err)?;
                if rows == 0 {
                    return Err(wrap_err(rusqlite::Error::QueryReturnedNoRows));
                }
                tx.commit().map_err(wrap_err)?;
                Ok(User {
                    id,
                    name,
                    username,
                    role,
                })
            })
            .await
            .map_err(|e| match map_tokio_rusqlite_error(e, "User", id.to_string()) {
                RepositoryError::AlreadyExists { entity_type, .. } => {
                    RepositoryError::AlreadyExists {
                        entity_type,
                        id: input.username.clone(),
                    }
                }
                other => other,
            })
    }

    async fn delete_user(&self, id: UserId) -> Result<()> {
        self.conn
            .call(move |conn| {
                let tx = conn.transaction().map_err(wrap_err)?;
                tx.execute(schema::DELETE_USER, [id]).map_err(wrap_err)?;
                tx.commit().map_err(wrap_err)?;
                Ok(())
            })
            .await
            .map_err(|e| map_tokio_rusqlite_error(e, "User", id.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cinebase_core::account::Role;

    async fn store() -> SqliteUserStore {
        SqliteUserStore::open_in_memory().await.unwrap()
    }

    #[tokio::test]
    async fn test_create_allocates_increasing_ids() {
        let store = store().await;

        let alice = store
            .create_user(&UserInput::new("Alice", "alice", "pw"))
            .await
            .unwrap();
        let bob = store
            .create_user(&UserInput::new("Bob", "bob", "pw"))
            .await
            .unwrap();

        assert_eq!(alice.id, 1);
        assert_eq!(bob.id, 2);
        assert_eq!(bob.role, Role::User);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let store = store().await;

        let alice = store
            .create_user(&UserInput::new("Alice", "alice", "pw"))
            .await
            .unwrap();
        store.delete_user(alice.id).await.unwrap();
        let bob = store
            .create_user(&UserInput::new("Bob", "bob", "pw"))
            .await
            .unwrap();

        assert!(bob.id > alice.id);
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = store().await;
        store
            .create_user(&UserInput::new("Bob", "bob", "pw"))
            .await
            .unwrap();

        let result = store.create_user(&UserInput::new("Other Bob", "bob", "x")).await;

        assert_eq!(result, Err(RepositoryError::username_taken("bob")));
    }

    #[tokio::test]
    async fn test_list_orders_by_descending_id() {
        let store = store().await;
        for name in ["a", "b", "c"] {
            store
                .create_user(&UserInput::new(name, name, "pw"))
                .await
                .unwrap();
        }

        let usernames: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();

        assert_eq!(usernames, vec!["c", "b", "a"]);
    }

    #[tokio::test]
    async fn test_get_user_by_username_includes_password() {
        let store = store().await;
        store
            .create_user(&UserInput::new("Bob", "bob", "secret"))
            .await
            .unwrap();

        let record = store.get_user_by_username("bob").await.unwrap().unwrap();
        assert_eq!(record.password, "secret");

        assert!(store.get_user_by_username("BOB").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_by_credentials() {
        let store = store().await;
        store
            .create_user(&UserInput::new("Bob", "bob", "secret"))
            .await
            .unwrap();

        let found = store.find_by_credentials("bob", "secret").await.unwrap();
        assert_eq!(found.map(|u| u.username), Some("bob".to_string()));

        let wrong = store.find_by_credentials("bob", "Secret").await.unwrap();
        assert!(wrong.is_none());
    }

    #[tokio::test]
    async fn test_update_round_trip() {
        let store = store().await;
        let bob = store
            .create_user(&UserInput::new("Bob", "bob", "pw"))
            .await
            .unwrap();

        let input = UserInput::new("Robert", "robert", "new").with_role(Role::Admin);
        store.update_user(bob.id, &input).await.unwrap();

        let updated = store.get_user(bob.id).await.unwrap().unwrap();
        assert_eq!(updated.name, "Robert");
        assert_eq!(updated.username, "robert");
        assert_eq!(updated.role, Role::Admin);
        let record = store.get_user_by_username("robert").await.unwrap().unwrap();
        assert_eq!(record.password, "new");
    }

    #[tokio::test]
    async fn test_update_nonexistent_is_not_found() {
        let store = store().await;

        let result = store
            .update_user(99, &UserInput::new("Ghost", "ghost", "pw"))
            .await;

        assert_eq!(result, Err(RepositoryError::user_not_found(99)));
    }

    #[tokio::test]
    async fn test_update_to_taken_username_is_rejected() {
        let store = store().await;
        store
            .create_user(&UserInput::new("Alice", "alice", "pw"))
            .await
            .unwrap();
        let bob = store
            .create_user(&UserInput::new("Bob", "bob", "pw"))
            .await
            .unwrap();

        let result = store
            .update_user(bob.id, &UserInput::new("Bob", "alice", "pw"))
            .await;

        assert_eq!(result, Err(RepositoryError::username_taken("alice")));
    }

    #[tokio::test]
    async fn test_delete_nonexistent_succeeds() {
        let store = store().await;
        assert!(store.delete_user(12345).await.is_ok());
    }

    #[tokio::test]
    async fn test_open_in_missing_directory_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("users.db");

        let result = SqliteUserStore::open(&path).await;

        assert!(matches!(
            result,
            Err(RepositoryError::BackendUnavailable(_))
        ));
    }
}
