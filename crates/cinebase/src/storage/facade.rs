//! Storage facade.
//!
//! [`Storage`] picks the user backend once, when it is initialized, and then
//! serves every account and session operation through it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, warn};

use cinebase_core::account::{
    normalize_credentials, resolve_user_form, validate_password_reset, validate_user_input,
    AccountError, Role, User, UserForm, UserId, UserInput, UserRecord, ADMIN_USERNAME,
};
use cinebase_core::storage::{KeyValueStore, RepositoryError, Result, UserStore};

use super::keyvalue::{FileStore, KeyValueUserStore, MemoryStore};
use super::session::SessionStore;
use crate::config::Config;

/// Which adapter serves user operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// SQLite `users` table.
    Relational,
    /// JSON list in the key-value store.
    KeyValue,
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Backend::Relational => f.write_str("sqlite"),
            Backend::KeyValue => f.write_str("key-value"),
        }
    }
}

/// Uniform account and session API over the selected backend.
#[derive(Clone)]
pub struct Storage {
    users: Arc<dyn UserStore>,
    sessions: SessionStore,
    backend: Backend,
}

impl Storage {
    /// Builds the stores described by `config` and initializes the facade.
    pub async fn from_config(config: &Config) -> Result<Self> {
        let kv: Arc<dyn KeyValueStore> = match &config.store_path {
            Some(path) => Arc::new(FileStore::open(path).await?),
            None => Arc::new(MemoryStore::new()),
        };

        Self::initialize(kv, config.sqlite_path.as_deref()).await
    }

    /// Initializes storage.
    ///
    /// Clears any leftover session, then tries to open SQLite at `sqlite_path`.
    /// If that is impossible (no path, engine not compiled in, open or schema
    /// failure) user records go to `kv` for the lifetime of this instance.
    /// Finally seeds the `admin` account when it is missing.
    pub async fn initialize(
        kv: Arc<dyn KeyValueStore>,
        sqlite_path: Option<&Path>,
    ) -> Result<Self> {
        let sessions = SessionStore::new(Arc::clone(&kv));
        sessions.clear().await?;

        let relational = open_relational(sqlite_path).await;
        let (users, backend): (Arc<dyn UserStore>, Backend) = match relational {
            Ok(store) => (store, Backend::Relational),
            Err(e) => {
                warn!(error = %e, "SQLite unavailable, using key-value fallback");
                (Arc::new(KeyValueUserStore::new(kv)), Backend::KeyValue)
            }
        };

        let storage = Self {
            users,
            sessions,
            backend,
        };
        storage.ensure_admin().await?;

        info!(%backend, "Storage initialized");
        Ok(storage)
    }

    /// The backend chosen during initialization.
    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Seeds the `admin` account when it is missing, and gives it back the
    /// admin role when no user holds that role any more.
    async fn ensure_admin(&self) -> Result<()> {
        let Some(record) = self.users.get_user_by_username(ADMIN_USERNAME).await? else {
            let admin = self.users.create_user(&UserInput::admin()).await?;
            info!(id = admin.id, "Seeded admin user");
            return Ok(());
        };

        if self.users.list_users().await?.iter().any(|u| u.role.is_admin()) {
            debug!("Admin user already present");
            return Ok(());
        }

        warn!(id = record.id, "No user has the admin role, restoring it on admin");
        let input = UserInput {
            name: record.name,
            username: record.username,
            password: record.password,
            role: Role::Admin,
        };
        self.users.update_user(record.id, &input).await?;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Users
    // ------------------------------------------------------------------

    /// Creates a user. Returns it without the password.
    pub async fn create_user(&self, input: UserInput) -> Result<User> {
        validate_user_input(&input)?;
        self.users.create_user(&input).await
    }

    /// Lists users, newest first.
    pub async fn list_users(&self) -> Result<Vec<User>> {
        self.users.list_users().await
    }

    /// Looks up a user by id, without the password.
    pub async fn get_user_by_id(&self, id: UserId) -> Result<Option<User>> {
        self.users.get_user(id).await
    }

    /// Looks up a user by username. The only lookup that returns the password.
    pub async fn get_user_by_username(&self, username: &str) -> Result<Option<UserRecord>> {
        self.users.get_user_by_username(username).await
    }

    /// Overwrites every field of user `id`. Fails with `NotFound` if it does
    /// not exist.
    pub async fn update_user(&self, id: UserId, input: UserInput) -> Result<User> {
        validate_user_input(&input)?;
        self.users.update_user(id, &input).await
    }

    /// Deletes user `id`.
    ///
    /// Deleting the user of the current session is an `InvalidOperation`;
    /// deleting a missing id succeeds.
    pub async fn delete_user(&self, id: UserId) -> Result<()> {
        if let Some(current) = self.sessions.get().await? {
            if current.id == id {
                return Err(RepositoryError::InvalidOperation(
                    "cannot delete the currently logged in user".to_string(),
                ));
            }
        }

        self.users.delete_user(id).await
    }

    /// Checks credentials exactly as given.
    ///
    /// On a match the user becomes the current session and is returned; this
    /// is not a read-only call.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<Option<User>> {
        let Some(user) = self.users.find_by_credentials(username, password).await? else {
            debug!(username, "Credentials rejected");
            return Ok(None);
        };

        self.sessions.set(Some(&user)).await?;
        info!(id = user.id, username = %user.username, "User authenticated");
        Ok(Some(user))
    }

    // ------------------------------------------------------------------
    // Session
    // ------------------------------------------------------------------

    /// The logged-in user, if any.
    pub async fn current_session(&self) -> Result<Option<User>> {
        self.sessions.get().await
    }

    /// Replaces the session record; `None` removes it.
    pub async fn set_current_session(&self, user: Option<&User>) -> Result<()> {
        self.sessions.set(user).await
    }

    /// Removes the session record.
    pub async fn clear_current_session(&self) -> Result<()> {
        self.sessions.clear().await
    }

    // ------------------------------------------------------------------
    // Account flows
    // ------------------------------------------------------------------

    /// Login form: trims both fields, requires them, then authenticates.
    pub async fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        let (username, password) = normalize_credentials(username, password)?;
        self.authenticate(&username, &password).await
    }

    /// Ends the current session.
    pub async fn logout(&self) -> Result<()> {
        self.clear_current_session().await
    }

    /// User administration form: creates when `form.id` is `None`, otherwise
    /// edits that user.
    pub async fn save_user(&self, form: &UserForm) -> Result<User> {
        match form.id {
            None => self.create_user(resolve_user_form(form, None)?).await,
            Some(id) => {
                let existing = self
                    .users
                    .get_user(id)
                    .await?
                    .ok_or_else(|| RepositoryError::user_not_found(id))?;
                let record = self
                    .users
                    .get_user_by_username(&existing.username)
                    .await?
                    .ok_or_else(|| RepositoryError::user_not_found(id))?;

                let input = resolve_user_form(form, Some(&record))?;
                self.update_user(id, input).await
            }
        }
    }

    /// Password recovery, first step: confirms the username exists.
    pub async fn verify_recovery_username(&self, username: &str) -> Result<UserRecord> {
        let username = username.trim();
        if username.is_empty() {
            return Err(AccountError::EmptyUsername.into());
        }

        self.users
            .get_user_by_username(username)
            .await?
            .ok_or_else(|| RepositoryError::NotFound {
                entity_type: "User",
                id: username.to_string(),
            })
    }

    /// Password recovery, second step: replaces only the password.
    pub async fn reset_password(
        &self,
        username: &str,
        new_password: &str,
        confirm_password: &str,
    ) -> Result<User> {
        validate_password_reset(new_password, confirm_password)?;
        let record = self.verify_recovery_username(username).await?;

        let input = UserInput {
            name: record.name,
            username: record.username,
            password: new_password.to_string(),
            role: record.role,
        };
        let user = self.users.update_user(record.id, &input).await?;

        info!(id = user.id, "Password reset");
        Ok(user)
    }
}

#[cfg(feature = "sqlite")]
async fn open_relational(path: Option<&Path>) -> Result<Arc<dyn UserStore>> {
    let path = path.ok_or_else(|| {
        RepositoryError::BackendUnavailable("no database path configured".to_string())
    })?;
    let store = super::sqlite::SqliteUserStore::open(path).await?;
    Ok(Arc::new(store))
}

#[cfg(not(feature = "sqlite"))]
async fn open_relational(_path: Option<&Path>) -> Result<Arc<dyn UserStore>> {
    Err(RepositoryError::BackendUnavailable(
        "built without the sqlite feature".to_string(),
    ))
}
