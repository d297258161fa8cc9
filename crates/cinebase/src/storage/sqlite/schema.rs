//! SQLite schema definitions and SQL query constants.
//!
//! Pure data, no I/O. Every statement is parameterized.

/// SQL statement to create the users table.
pub const CREATE_TABLES: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    username TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL,
    role TEXT NOT NULL
);
"#;

pub const INSERT_USER: &str = r#"
INSERT INTO users (name, username, password, role)
VALUES (?1, ?2, ?3, ?4)
"#;

pub const SELECT_USERS: &str = r#"
SELECT id, name, username, role
FROM users
ORDER BY id DESC
"#;

pub const SELECT_USER_BY_ID: &str = r#"
SELECT id, name, username, role
FROM users
WHERE id = ?1
"#;

pub const SELECT_USER_RECORD_BY_USERNAME: &str = r#"
SELECT id, name, username, password, role
FROM users
WHERE username = ?1
LIMIT 1
"#;

pub const SELECT_USER_BY_CREDENTIALS: &str = r#"
SELECT id, name, username, role
FROM users
WHERE username = ?1 AND password = ?2
LIMIT 1
"#;

pub const UPDATE_USER: &str = r#"
UPDATE users
SET name = ?2, username = ?3, password = ?4, role = ?5
WHERE id = ?1
"#;

pub const DELETE_USER: &str = r#"
DELETE FROM users
WHERE id = ?1
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_tables_declares_unique_username() {
        assert!(CREATE_TABLES.contains("CREATE TABLE IF NOT EXISTS users"));
        assert!(CREATE_TABLES.contains("AUTOINCREMENT"));
        assert!(CREATE_TABLES.contains("username TEXT NOT NULL UNIQUE"));
    }

    #[test]
    fn test_public_queries_never_select_password() {
        assert!(!SELECT_USERS.contains("password"));
        assert!(!SELECT_USER_BY_ID.contains("password"));
        assert!(SELECT_USER_RECORD_BY_USERNAME.contains("password"));
        assert!(SELECT_USERS.contains("ORDER BY id DESC"));
    }
}
