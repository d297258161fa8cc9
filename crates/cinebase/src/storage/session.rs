//! Persistence of the current session record.

use std::sync::Arc;

use tracing::{debug, warn};

use cinebase_core::account::User;
use cinebase_core::storage::{
    deserialize_session, serialize_session, KeyValueStore, Result, SESSION_KEY,
};

/// Holds the single "current user" record under [`SESSION_KEY`].
///
/// Always key-value backed, whichever user store is active.
#[derive(Clone)]
pub struct SessionStore {
    store: Arc<dyn KeyValueStore>,
}

impl SessionStore {
    /// Wraps the key-value store that holds the session.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Returns the current session. Corrupt content reads as no session.
    pub async fn get(&self) -> Result<Option<User>> {
        let Some(raw) = self.store.get(SESSION_KEY).await? else {
            return Ok(None);
        };

        match deserialize_session(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(key = SESSION_KEY, error = %e, "Ignoring corrupt session record");
                Ok(None)
            }
        }
    }

    /// Replaces the session, or removes it when `user` is `None`.
    pub async fn set(&self, user: Option<&User>) -> Result<()> {
        match user {
            Some(user) => {
                let raw = serialize_session(user)?;
                self.store.set(SESSION_KEY, &raw).await?;
                debug!(id = user.id, username = %user.username, "Session saved");
            }
            None => self.clear().await?,
        }
        Ok(())
    }

    /// Removes the session record.
    pub async fn clear(&self) -> Result<()> {
        self.store.remove(SESSION_KEY).await?;
        debug!("Session cleared");
        Ok(())
    }
}
