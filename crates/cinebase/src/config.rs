use std::env;
use std::path::PathBuf;

/// Default SQLite database file.
pub const DEFAULT_SQLITE_PATH: &str = "users.db";
/// Default key-value store file.
pub const DEFAULT_STORE_PATH: &str = "cinebase-store.json";

/// Storage configuration loaded from environment variables.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// SQLite database path. `None` disables the relational backend.
    /// `":memory:"` opens a throwaway in-memory database.
    pub sqlite_path: Option<PathBuf>,
    /// Key-value store file. `None` keeps the store in memory.
    pub store_path: Option<PathBuf>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `CINEBASE_SQLITE_PATH` - SQLite database path (default: "users.db");
    ///   an empty value disables SQLite
    /// - `CINEBASE_STORE_PATH` - key-value store file (default: "cinebase-store.json");
    ///   an empty value keeps the store in memory
    pub fn from_env() -> Self {
        Self {
            sqlite_path: path_setting(env::var("CINEBASE_SQLITE_PATH").ok(), DEFAULT_SQLITE_PATH),
            store_path: path_setting(env::var("CINEBASE_STORE_PATH").ok(), DEFAULT_STORE_PATH),
        }
    }

    /// Configuration with nothing on disk: key-value backend in memory.
    pub fn ephemeral() -> Self {
        Self {
            sqlite_path: None,
            store_path: None,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}

/// Resolves a path setting: unset uses `default`, empty disables it.
pub fn path_setting(value: Option<String>, default: &str) -> Option<PathBuf> {
    match value {
        None => Some(PathBuf::from(default)),
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(PathBuf::from(v)),
    }
}
