//! User Entity

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;

use crate::domain::value_object::{user_id::UserId, user_name::UserName};

/// User entity
///
/// The password hash lives here because the credential is part of the
/// account itself. It never leaves the crate: Debug output is redacted
/// by the hash type and no DTO exposes it.
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// User name (unique, for login and display)
    pub user_name: UserName,
    /// Argon2id hash in PHC string format (salt embedded)
    pub password_hash: HashedPassword,
    /// When the account was registered
    pub created_at: DateTime<Utc>,
    /// Last account change
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Register a fresh account around an already-hashed credential
    pub fn new(user_name: UserName, password_hash: HashedPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::ClearTextPassword;

    fn hash(raw: &str) -> HashedPassword {
        ClearTextPassword::new(raw.to_string())
            .unwrap()
            .hash(None)
            .unwrap()
    }

    #[test]
    fn test_new_user_gets_fresh_id() {
        let a = User::new(UserName::new("alice").unwrap(), hash("correct horse battery"));
        let b = User::new(UserName::new("alice").unwrap(), hash("correct horse battery"));
        assert_ne!(a.user_id, b.user_id);
    }

    #[test]
    fn test_debug_redacts_credential() {
        let user = User::new(UserName::new("alice").unwrap(), hash("correct horse battery"));
        let debug = format!("{user:?}");
        assert!(!debug.contains("argon2id"));
    }
}
