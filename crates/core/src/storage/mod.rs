mod error;
mod keys;
mod serialization;
mod traits;

pub use error::{RepositoryError, Result};
pub use keys::{SESSION_KEY, USERS_KEY};
pub use serialization::{
    deserialize_session, deserialize_users, serialize_session, serialize_users,
};
pub use traits::{KeyValueStore, UserStore};
