//! Shared fixtures for service tests.

use spendlog_database::User;

/// A user row as the authenticator would hand it to a handler.
pub fn test_user(id: i64) -> User {
    let now = chrono::Utc::now().to_rfc3339();
    User {
        id,
        email: format!("user{id}@example.com"),
        full_name: format!("User {id}"),
        password_hash: String::new(),
        created_at: now.clone(),
        updated_at: now,
    }
}
