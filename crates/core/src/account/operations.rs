//! Pure account rules: input validation and id allocation.

use super::{AccountError, UserForm, UserId, UserInput, UserRecord, DEFAULT_PASSWORD};

/// Validates the fields of a user before it is created or overwritten.
pub fn validate_user_input(input: &UserInput) -> Result<(), AccountError> {
    if input.name.trim().is_empty() {
        return Err(AccountError::EmptyName);
    }
    if input.username.trim().is_empty() {
        return Err(AccountError::EmptyUsername);
    }
    Ok(())
}

/// Turns an administration form into the values to store.
///
/// `existing` is the stored record of the user being edited, or `None` when
/// creating. Fields the form leaves out keep their stored values; on create
/// they fall back to the `user` role and [`DEFAULT_PASSWORD`]. A blank
/// password counts as left out.
pub fn resolve_user_form(
    form: &UserForm,
    existing: Option<&UserRecord>,
) -> Result<UserInput, AccountError> {
    let name = form
        .name
        .as_deref()
        .or(existing.map(|r| r.name.as_str()))
        .unwrap_or_default();
    let username = form
        .username
        .as_deref()
        .or(existing.map(|r| r.username.as_str()))
        .unwrap_or_default();
    let password = match form.password.as_deref() {
        Some(p) if !p.is_empty() => p,
        _ => existing.map_or(DEFAULT_PASSWORD, |r| r.password.as_str()),
    };
    let role = form
        .role
        .or_else(|| existing.map(|r| r.role))
        .unwrap_or_default();

    let input = UserInput {
        name: name.trim().to_string(),
        username: username.trim().to_string(),
        password: password.to_string(),
        role,
    };
    validate_user_input(&input)?;
    Ok(input)
}

/// Trims login input and rejects blanks.
pub fn normalize_credentials(
    username: &str,
    password: &str,
) -> Result<(String, String), AccountError> {
    let username = username.trim();
    let password = password.trim();
    if username.is_empty() || password.is_empty() {
        return Err(AccountError::MissingCredentials);
    }
    Ok((username.to_string(), password.to_string()))
}

/// Checks the two password fields of the recovery form.
pub fn validate_password_reset(new_password: &str, confirm: &str) -> Result<(), AccountError> {
    if new_password.is_empty() || confirm.is_empty() {
        return Err(AccountError::MissingPassword);
    }
    if new_password != confirm {
        return Err(AccountError::PasswordMismatch);
    }
    Ok(())
}

/// Next id for a list-backed store: one past the largest id, starting at 1.
pub fn next_user_id(records: &[UserRecord]) -> UserId {
    records.iter().map(|r| r.id).fold(0, UserId::max) + 1
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Role;

    fn form(name: &str, username: &str, password: Option<&str>) -> UserForm {
        UserForm {
            password: password.map(str::to_string),
            ..UserForm::create(name, username)
        }
    }

    fn stored_admin() -> UserRecord {
        UserInput::new("Admin", "admin", "secret")
            .with_role(Role::Admin)
            .into_record(1)
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let input = UserInput::new("   ", "bob", "pw");
        assert_eq!(validate_user_input(&input), Err(AccountError::EmptyName));
    }

    #[test]
    fn test_validate_rejects_blank_username() {
        let input = UserInput::new("Bob", "", "pw");
        assert_eq!(validate_user_input(&input), Err(AccountError::EmptyUsername));
    }

    #[test]
    fn test_resolve_form_uses_default_password_on_create() {
        let input = resolve_user_form(&form("Bob", "bob", None), None).unwrap();
        assert_eq!(input.password, "1234");
        assert_eq!(input.role, Role::User);

        let input = resolve_user_form(&form("Bob", "bob", Some("")), None).unwrap();
        assert_eq!(input.password, "1234");
    }

    #[test]
    fn test_resolve_form_create_requires_names() {
        let result = resolve_user_form(&UserForm::default(), None);
        assert_eq!(result, Err(AccountError::EmptyName));

        let form = UserForm {
            name: Some("Bob".to_string()),
            ..UserForm::default()
        };
        assert_eq!(resolve_user_form(&form, None), Err(AccountError::EmptyUsername));
    }

    #[test]
    fn test_resolve_form_keeps_stored_password_on_edit() {
        let admin = stored_admin();

        let input = resolve_user_form(&form("Bob", "bob", None), Some(&admin)).unwrap();
        assert_eq!(input.password, "secret");

        let input = resolve_user_form(&form("Bob", "bob", Some("new")), Some(&admin)).unwrap();
        assert_eq!(input.password, "new");
    }

    #[test]
    fn test_resolve_form_edit_keeps_omitted_fields() {
        let admin = stored_admin();
        let rename = UserForm {
            name: Some("Administrator".to_string()),
            ..UserForm::edit(admin.id)
        };

        let input = resolve_user_form(&rename, Some(&admin)).unwrap();

        assert_eq!(input.name, "Administrator");
        assert_eq!(input.username, "admin");
        assert_eq!(input.password, "secret");
        assert_eq!(input.role, Role::Admin);
    }

    #[test]
    fn test_resolve_form_edit_rejects_blanked_name() {
        let admin = stored_admin();
        let blank = UserForm {
            name: Some("  ".to_string()),
            ..UserForm::edit(admin.id)
        };

        assert_eq!(
            resolve_user_form(&blank, Some(&admin)),
            Err(AccountError::EmptyName)
        );
    }

    #[test]
    fn test_resolve_form_trims_names() {
        let input = resolve_user_form(&form("  Bob ", " bob ", Some("pw")), None).unwrap();
        assert_eq!(input.name, "Bob");
        assert_eq!(input.username, "bob");
    }

    #[test]
    fn test_normalize_credentials() {
        assert_eq!(
            normalize_credentials(" admin ", "admin\n").unwrap(),
            ("admin".to_string(), "admin".to_string())
        );
        assert_eq!(
            normalize_credentials("admin", "   "),
            Err(AccountError::MissingCredentials)
        );
    }

    #[test]
    fn test_validate_password_reset() {
        assert!(validate_password_reset("a", "a").is_ok());
        assert_eq!(
            validate_password_reset("a", "b"),
            Err(AccountError::PasswordMismatch)
        );
        assert_eq!(
            validate_password_reset("", ""),
            Err(AccountError::MissingPassword)
        );
    }

    #[test]
    fn test_next_user_id() {
        assert_eq!(next_user_id(&[]), 1);

        let records = vec![
            UserInput::new("A", "a", "x").into_record(3),
            UserInput::new("B", "b", "x").into_record(9),
            UserInput::new("C", "c", "x").into_record(4),
        ];
        assert_eq!(next_user_id(&records), 10);
    }
}
