//! Pretty output formatting.

use cinebase_core::account::User;

/// Format a user for display.
pub fn format_user(user: &User) -> String {
    format!(
        "{}\n  ID: {}\n  Username: {}\n  Role: {}",
        user.name, user.id, user.username, user.role
    )
}

/// One row per user under a header counting admins.
pub fn format_users(users: &[User]) -> String {
    if users.is_empty() {
        return "No users found.".to_string();
    }

    let admins = users.iter().filter(|u| u.role.is_admin()).count();
    let width = users.iter().map(|u| u.username.len()).max().unwrap_or(0);

    let mut lines = vec![format!("{} users, {} admin", users.len(), admins)];
    lines.extend(users.iter().map(|u| {
        format!(
            "{:>4}  {:<width$}  {:<5}  {}",
            u.id,
            u.username,
            u.role.as_str(),
            u.name
        )
    }));
    lines.join("\n")
}
