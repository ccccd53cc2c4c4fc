//! Sign In Use Case
//!
//! Authenticates a user through the credential verifier and rotates the
//! session: credentials are checked, a fresh session bound to the user
//! is created, and the anonymous pre-login session is retired. The old
//! token stops working the moment the new cookie is issued.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::issue_session_token;
use crate::domain::entity::{
    session::{Session, SessionData},
    user::User,
};
use crate::domain::repository::SessionRepository;
use crate::domain::value_object::session_id::SessionId;
use crate::domain::verifier::CredentialVerifier;
use crate::error::AuthResult;

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
    /// Payload for the fresh session (e.g. a welcome flash)
    pub initial_data: SessionData,
    /// Anonymous session to retire once the new one exists
    pub previous_session: Option<SessionId>,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user: User,
    /// Signed token for the session cookie
    pub session_token: String,
}

/// Sign in use case
pub struct SignInUseCase<V, S>
where
    V: CredentialVerifier,
    S: SessionRepository,
{
    verifier: Arc<V>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<V, S> SignInUseCase<V, S>
where
    V: CredentialVerifier,
    S: SessionRepository,
{
    pub fn new(verifier: Arc<V>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            verifier,
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        // Verify credentials through the configured strategy
        let user = self
            .verifier
            .verify_credentials(&input.user_name, input.password)
            .await?;

        // Rotate: new session for the user, retire the anonymous one
        let session = Session::for_user(user.user_id, input.initial_data, self.config.session_ttl());
        self.session_repo.create_session(&session).await?;
        self.retire_previous_session(input.previous_session).await;

        let session_token = issue_session_token(&self.config, session.session_id);

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput {
            user,
            session_token,
        })
    }

    /// Best-effort removal of the pre-login session.
    /// A leftover row only lingers until the expiry sweep.
    async fn retire_previous_session(&self, previous: Option<SessionId>) {
        let Some(session_id) = previous else { return };
        if let Err(error) = self.session_repo.delete_session(session_id).await {
            tracing::warn!(error = %error, session_id = %session_id, "Failed to retire pre-login session");
        }
    }
}
