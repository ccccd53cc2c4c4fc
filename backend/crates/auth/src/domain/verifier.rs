//! Credential Verification
//!
//! `CredentialVerifier` is the seam between the login flow and the
//! credential store. The sign-in use case only knows this capability,
//! so the password scheme can change without touching the flow.
//!
//! Failures distinguish `UnknownUser` from `InvalidCredential` for
//! telemetry, but both render the same user-facing message. Login
//! responses must not reveal whether a user name is registered.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Capability to check a user name + password pair against stored credentials
#[trait_variant::make(CredentialVerifier: Send)]
pub trait LocalCredentialVerifier {
    /// Verify the pair, returning the matching user
    async fn verify_credentials(&self, user_name: &str, password: String) -> AuthResult<User>;
}

/// Argon2id-backed verifier reading users from a [`UserRepository`]
pub struct PasswordVerifier<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    pepper: Option<Vec<u8>>,
}

impl<U> PasswordVerifier<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, pepper: Option<Vec<u8>>) -> Self {
        Self { user_repo, pepper }
    }
}

impl<U> CredentialVerifier for PasswordVerifier<U>
where
    U: UserRepository + Send + Sync,
{
    async fn verify_credentials(&self, user_name: &str, password: String) -> AuthResult<User> {
        // A name that fails validation can never have been registered
        let user_name = UserName::new(user_name).map_err(|_| AuthError::UnknownUser)?;

        let user = self
            .user_repo
            .find_by_user_name(&user_name)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        // Same reasoning for the password policy
        let password =
            ClearTextPassword::new(password).map_err(|_| AuthError::InvalidCredential)?;

        if !user.password_hash.verify(&password, self.pepper.as_deref()) {
            return Err(AuthError::InvalidCredential);
        }

        Ok(user)
    }
}
