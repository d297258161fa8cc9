//! SQLite row conversion functions.
//!
//! Pure functions for converting between SQLite rows and domain types.

use cinebase_core::account::{Role, User, UserRecord};
use rusqlite::types::Type;
use rusqlite::Row;

/// Convert a SQLite row to a User.
///
/// Expected columns: id, name, username, role
pub fn row_to_user(row: &Row) -> rusqlite::Result<User> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let username: String = row.get(2)?;
    let role: String = row.get(3)?;

    Ok(User {
        id,
        name,
        username,
        role: parse_role(&role, 3)?,
    })
}

/// Convert a SQLite row to a UserRecord.
///
/// Expected columns: id, name, username, password, role
pub fn row_to_user_record(row: &Row) -> rusqlite::Result<UserRecord> {
    let id: i64 = row.get(0)?;
    let name: String = row.get(1)?;
    let username: String = row.get(2)?;
    let password: String = row.get(3)?;
    let role: String = row.get(4)?;

    Ok(UserRecord {
        id,
        name,
        username,
        password,
        role: parse_role(&role, 4)?,
    })
}

fn parse_role(s: &str, column: usize) -> rusqlite::Result<Role> {
    s.parse()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(column, Type::Text, Box::new(e)))
}
