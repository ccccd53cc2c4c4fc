//! Restore Session Use Case
//!
//! Runs on every request. Resolves the cookie token into a live session
//! row, creating an anonymous one when nothing usable exists, then
//! resolves the session's user claim into an [`AuthState`].
//!
//! Handlers must always see a working session, so recoverable problems
//! (bad token, dead row, store read failure) never fail the request:
//! they are logged and the user continues on a fresh anonymous session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_token::parse_session_token;
use crate::domain::auth_state::{AuthState, CurrentUser};
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::AuthResult;

/// Result of restoring a session for one request
pub struct RestoredSession {
    pub session: Session,
    pub auth: AuthState,
    /// True when no usable session existed and a fresh row was created
    pub is_new: bool,
}

/// Restore session use case
pub struct RestoreSessionUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RestoreSessionUseCase<R>
where
    R: UserRepository + SessionRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, token: Option<&str>) -> AuthResult<RestoredSession> {
        let existing = match token {
            Some(token) => self.load_existing(token).await,
            None => None,
        };

        let (mut session, is_new) = match existing {
            Some(session) => (session, false),
            None => {
                // The row exists before the response is written, so
                // flashes set during this request have somewhere to live.
                let session = Session::anonymous(self.config.session_ttl());
                self.repo.create_session(&session).await?;
                (session, true)
            }
        };

        let auth = self.resolve_identity(&mut session).await;

        Ok(RestoredSession {
            session,
            auth,
            is_new,
        })
    }

    /// Load the session the token points at. Bad tokens, dead rows, and
    /// store read failures all resolve to `None` and a fresh start.
    async fn load_existing(&self, token: &str) -> Option<Session> {
        let session_id = parse_session_token(&self.config, token).ok()?;

        let session = match self.repo.find_session(session_id).await {
            Ok(found) => found?,
            Err(error) => {
                tracing::error!(error = %error, session_id = %session_id, "Session lookup failed");
                return None;
            }
        };

        if session.is_expired() {
            if let Err(error) = self.repo.delete_session(session_id).await {
                tracing::warn!(error = %error, session_id = %session_id, "Failed to drop expired session");
            }
            return None;
        }

        Some(session)
    }

    /// Resolve the session's user claim into an authentication state.
    ///
    /// A claim pointing at a missing account is dropped from the session
    /// and persisted; the request continues anonymously instead of
    /// failing. A store error leaves the claim in place so a transient
    /// outage cannot log anyone out.
    async fn resolve_identity(&self, session: &mut Session) -> AuthState {
        let Some(user_id) = session.user_id else {
            return AuthState::Anonymous;
        };

        tracing::trace!(
            user_id = %user_id,
            state = ?AuthState::Authenticating,
            "Verifying session claim"
        );

        match self.repo.find_by_id(&user_id).await {
            Ok(Some(user)) => AuthState::Authenticated(CurrentUser::from(&user)),
            Ok(None) => {
                session.clear_identity();
                if let Err(error) = self.repo.save_session(session).await {
                    tracing::warn!(error = %error, "Failed to persist dropped session claim");
                }
                tracing::warn!(user_id = %user_id, "Session claim pointed at a missing user");
                AuthState::Anonymous
            }
            Err(error) => {
                tracing::error!(error = %error, "User lookup failed during session restore");
                AuthState::Anonymous
            }
        }
    }
}
