/// Key holding the serialized session record.
pub const SESSION_KEY: &str = "@user";

/// Key holding the serialized list of users for the key-value backend.
pub const USERS_KEY: &str = "@users_fallback";
