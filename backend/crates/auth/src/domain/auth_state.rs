//! Authentication State
//!
//! Per-request authentication lifecycle. Every request starts `Anonymous`.
//! When the restored session carries a user claim, the state moves to
//! `Authenticating` while the claim is checked against the user store,
//! then settles on `Authenticated` or falls back to `Anonymous` (the
//! stale claim is dropped from the session, never turned into an error).

use crate::domain::entity::user::User;
use crate::domain::value_object::user_id::UserId;

/// Resolved identity attached to a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    /// Display form of the user name
    pub user_name: String,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            user_name: user.user_name.original().to_string(),
        }
    }
}

/// Authentication state for one request
#[derive(Debug, Clone, Default, PartialEq)]
pub enum AuthState {
    /// No user claim on the session
    #[default]
    Anonymous,
    /// Session carries a claim that has not been verified yet
    Authenticating,
    /// Claim verified against the user store
    Authenticated(CurrentUser),
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The verified user, if any
    pub fn user(&self) -> Option<&CurrentUser> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
