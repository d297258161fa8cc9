//! User CLI commands.

use clap::{Parser, Subcommand};

use cinebase_core::account::{Role, UserId};

/// User management commands.
#[derive(Debug, Parser)]
pub struct UsersCommand {
    /// Administrator username.
    #[arg(long = "as", default_value = "admin")]
    pub as_user: String,

    /// Administrator password.
    #[arg(long, env = "CINEBASE_ADMIN_PASSWORD")]
    pub password: String,

    #[command(subcommand)]
    pub action: UsersAction,
}

/// Available user actions.
#[derive(Debug, Subcommand)]
pub enum UsersAction {
    /// List all users.
    List,
    /// Get user by ID.
    Get {
        /// User ID.
        id: UserId,
    },
    /// Create a new user.
    Create {
        /// Display name.
        #[arg(long)]
        name: String,
        /// Login name.
        #[arg(long)]
        username: String,
        /// Password (defaults to "1234").
        #[arg(long)]
        password: Option<String>,
        /// Role: admin or user.
        #[arg(long, default_value = "user")]
        role: Role,
    },
    /// Update an existing user. Omitted fields keep their current values.
    Update {
        /// User ID.
        id: UserId,
        /// Display name.
        #[arg(long)]
        name: Option<String>,
        /// Login name.
        #[arg(long)]
        username: Option<String>,
        /// New password.
        #[arg(long)]
        password: Option<String>,
        /// Role: admin or user.
        #[arg(long)]
        role: Option<Role>,
    },
    /// Delete user by ID.
    Delete {
        /// User ID.
        id: UserId,
    },
}
