mod error;
mod operations;
mod types;

pub use error::AccountError;
pub use operations::{
    next_user_id, normalize_credentials, resolve_user_form, validate_password_reset,
    validate_user_input,
};
pub use types::{
    Role, User, UserForm, UserId, UserInput, UserRecord, ADMIN_NAME, ADMIN_PASSWORD,
    ADMIN_USERNAME, DEFAULT_PASSWORD,
};
