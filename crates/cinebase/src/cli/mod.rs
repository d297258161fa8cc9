//! CLI command definitions.

pub mod users;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;

/// Account administration for cinebase storage.
#[derive(Debug, Parser)]
#[command(name = "cinebase")]
#[command(version, about = "Account administration for cinebase storage", long_about = None)]
pub struct Cli {
    /// SQLite database path.
    #[arg(long, global = true, env = "CINEBASE_SQLITE_PATH")]
    pub sqlite_path: Option<PathBuf>,

    /// Do not try SQLite; keep users in the key-value store.
    #[arg(long, global = true)]
    pub no_sqlite: bool,

    /// Key-value store file.
    #[arg(long, global = true, env = "CINEBASE_STORE_PATH")]
    pub store_path: Option<PathBuf>,

    /// Keep the key-value store in memory.
    #[arg(long, global = true)]
    pub memory_store: bool,

    /// Output format.
    #[arg(long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Storage configuration: environment defaults overridden by flags.
    pub fn config(&self) -> Config {
        let mut config = Config::from_env();
        if let Some(path) = &self.sqlite_path {
            config.sqlite_path = Some(path.clone());
        }
        if let Some(path) = &self.store_path {
            config.store_path = Some(path.clone());
        }
        if self.no_sqlite {
            config.sqlite_path = None;
        }
        if self.memory_store {
            config.store_path = None;
        }
        config
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Prepare storage and report the active backend.
    Init,
    /// Check credentials.
    Login {
        username: String,
        password: String,
    },
    /// User management (admin only).
    Users(users::UsersCommand),
    /// Reset a forgotten password.
    Recover {
        username: String,
        new_password: String,
        confirm_password: String,
    },
}
