//! Key-value storage backend.
//!
//! [`MemoryStore`] and [`FileStore`] implement the raw `KeyValueStore`
//! contract; [`KeyValueUserStore`] keeps user accounts on top of either one
//! and is the fallback when SQLite cannot be used.

mod file;
mod memory;
mod users;

pub use file::FileStore;
pub use memory::MemoryStore;
pub use users::KeyValueUserStore;
