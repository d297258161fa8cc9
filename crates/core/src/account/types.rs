use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::AccountError;

/// Identifier assigned to a user when it is first stored.
pub type UserId = i64;

/// Display name of the seeded administrator.
pub const ADMIN_NAME: &str = "Admin";
/// Username of the seeded administrator.
pub const ADMIN_USERNAME: &str = "admin";
/// Initial password of the seeded administrator.
pub const ADMIN_PASSWORD: &str = "admin";
/// Password given to users created without one.
pub const DEFAULT_PASSWORD: &str = "1234";

/// Access level of a user account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

impl Role {
    /// Returns the textual form stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }

    /// Returns true for accounts allowed into the administration area.
    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(AccountError::UnknownRole(other.to_string())),
        }
    }
}

/// A user as exposed to callers. Never carries the password.
///
/// This is also the shape of the persisted session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub role: Role,
}

/// A stored user including its credential.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl UserRecord {
    /// Builds a record from an input and an already allocated id.
    pub fn from_input(id: UserId, input: UserInput) -> Self {
        Self {
            id,
            name: input.name,
            username: input.username,
            password: input.password,
            role: input.role,
        }
    }

    /// Returns the public projection of this record.
    pub fn public(&self) -> User {
        User {
            id: self.id,
            name: self.name.clone(),
            username: self.username.clone(),
            role: self.role,
        }
    }

    /// Exact, case-sensitive credential comparison.
    pub fn matches_credentials(&self, username: &str, password: &str) -> bool {
        self.username == username && self.password == password
    }
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            username: record.username,
            role: record.role,
        }
    }
}

/// Field values for creating or overwriting a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInput {
    pub name: String,
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl UserInput {
    /// Creates an input with the default `user` role.
    pub fn new(
        name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            username: username.into(),
            password: password.into(),
            role: Role::User,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// The record seeded when no `admin` user exists.
    pub fn admin() -> Self {
        Self::new(ADMIN_NAME, ADMIN_USERNAME, ADMIN_PASSWORD).with_role(Role::Admin)
    }

    /// Returns this input as a stored record with the given id.
    pub fn into_record(self, id: UserId) -> UserRecord {
        UserRecord::from_input(id, self)
    }
}

/// Values submitted from the user administration form.
///
/// `id` is `None` when creating. When editing, every field left as `None`
/// keeps the stored value. A blank password also keeps the stored one, and
/// on create it means [`DEFAULT_PASSWORD`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserForm {
    pub id: Option<UserId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
}

impl UserForm {
    /// A create form with the default `user` role and password.
    pub fn create(name: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            username: Some(username.into()),
            ..Self::default()
        }
    }

    /// An edit form for user `id` that changes nothing yet.
    pub fn edit(id: UserId) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}
