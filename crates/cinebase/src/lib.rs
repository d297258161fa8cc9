//! cinebase - account storage for the movie catalog app.
//!
//! The [`Storage`] facade keeps user accounts in SQLite when it can be opened
//! and falls back to a JSON key-value store otherwise.

pub mod cli;
pub mod config;
pub mod output;
pub mod storage;

pub use config::Config;
pub use storage::{Backend, Storage};
