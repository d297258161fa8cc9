//! Storage backend implementations.
//!
//! Concrete implementations of the traits defined in `cinebase_core::storage`
//! and the [`Storage`] facade that chooses between them at startup.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite user store using `rusqlite` and `tokio-rusqlite`.
//!   Without it the facade always runs on the key-value fallback.

mod facade;
pub mod keyvalue;
mod session;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use facade::{Backend, Storage};
pub use session::SessionStore;
