//! Sign Up Use Case
//!
//! Creates a new user account and logs it straight in on a fresh session.

use std::sync::Arc;

use platform::password::ClearTextPassword;

use crate::application::config::AuthConfig;
use crate::application::session_token::issue_session_token;
use crate::domain::entity::{
    session::{Session, SessionData},
    user::User,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{session_id::SessionId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
    /// Payload for the fresh session (e.g. a welcome flash)
    pub initial_data: SessionData,
    /// Anonymous session to retire once the new one exists
    pub previous_session: Option<SessionId>,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user: User,
    /// Signed token for the session cookie
    pub session_token: String,
}

/// Sign up use case
pub struct SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    user_repo: Arc<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignUpUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            user_repo,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        // Validate user name
        let user_name = UserName::new(&input.user_name)
            .map_err(|e| AuthError::InvalidUserName(e.to_string()))?;

        // Check if user name is taken
        if self.user_repo.exists_by_user_name(&user_name).await? {
            return Err(AuthError::UserNameTaken);
        }

        // Validate and hash password
        let password = ClearTextPassword::new(input.password)
            .map_err(|e| AuthError::PasswordValidation(e.to_string()))?;
        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        // Persist the account
        let user = User::new(user_name, password_hash);
        self.user_repo.create(&user).await?;

        // Log the new account in on a fresh session
        let session = Session::for_user(user.user_id, input.initial_data, self.config.session_ttl());
        self.session_repo.create_session(&session).await?;
        self.retire_previous_session(input.previous_session).await;

        let session_token = issue_session_token(&self.config, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            user_name = %user.user_name,
            "User signed up"
        );

        Ok(SignUpOutput {
            user,
            session_token,
        })
    }

    /// Best-effort removal of the pre-signup anonymous session.
    /// A leftover row only lingers until the expiry sweep.
    async fn retire_previous_session(&self, previous: Option<SessionId>) {
        let Some(session_id) = previous else { return };
        if let Err(error) = self.session_repo.delete_session(session_id).await {
            tracing::warn!(error = %error, session_id = %session_id, "Failed to retire pre-signup session");
        }
    }
}
