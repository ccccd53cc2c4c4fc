//! In-memory repository fakes for use case and middleware tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use chrono::{Duration, Utc};
use platform::password::ClearTextPassword;

use crate::domain::entity::{
    session::{Session, SessionData},
    user::User,
};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{
    session_id::SessionId, user_id::UserId, user_name::UserName,
};
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
struct Store {
    users: Vec<User>,
    sessions: Vec<Session>,
}

/// Shared in-memory store implementing both repository traits.
#[derive(Clone, Default)]
pub(crate) struct InMemoryAuthRepo {
    store: Arc<Mutex<Store>>,
    fail_find_session: Arc<AtomicBool>,
    fail_find_user: Arc<AtomicBool>,
}

impl InMemoryAuthRepo {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn user_count(&self) -> usize {
        self.store.lock().unwrap().users.len()
    }

    pub(crate) fn session_count(&self) -> usize {
        self.store.lock().unwrap().sessions.len()
    }

    pub(crate) fn sessions(&self) -> Vec<Session> {
        self.store.lock().unwrap().sessions.clone()
    }

    pub(crate) fn session(&self, session_id: SessionId) -> Option<Session> {
        self.store
            .lock()
            .unwrap()
            .sessions
            .iter()
            .find(|s| s.session_id == session_id)
            .cloned()
    }

    /// Insert a week-long anonymous session directly into the store.
    pub(crate) fn seed_anonymous_session(&self) -> Session {
        self.seed_session(None, SessionData::default())
    }

    pub(crate) fn seed_session(&self, user_id: Option<UserId>, data: SessionData) -> Session {
        let mut session = Session::anonymous(Duration::days(7));
        session.user_id = user_id;
        session.data = data;
        self.store.lock().unwrap().sessions.push(session.clone());
        session
    }

    /// Overwrite a stored session wholesale (e.g. to backdate expiry).
    pub(crate) fn replace_session(&self, session: Session) {
        let mut store = self.store.lock().unwrap();
        store.sessions.retain(|s| s.session_id != session.session_id);
        store.sessions.push(session);
    }

    pub(crate) fn fail_session_lookups(&self) {
        self.fail_find_session.store(true, Ordering::SeqCst);
    }

    pub(crate) fn fail_user_lookups(&self) {
        self.fail_find_user.store(true, Ordering::SeqCst);
    }
}

/// Register a user with a real Argon2 hash so verification works.
pub(crate) fn registered_user(repo: &InMemoryAuthRepo, name: &str, password: &str) -> User {
    let password_hash = ClearTextPassword::new(password.to_string())
        .unwrap()
        .hash(None)
        .unwrap();
    let user = User::new(UserName::new(name).unwrap(), password_hash);
    repo.store.lock().unwrap().users.push(user.clone());
    user
}

impl UserRepository for InMemoryAuthRepo {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.store.lock().unwrap().users.push(user.clone());
        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        if self.fail_find_user.load(Ordering::SeqCst) {
            return Err(AuthError::Internal("injected user lookup failure".into()));
        }
        Ok(self
            .store
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.user_id == *user_id)
            .cloned())
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .users
            .iter()
            .find(|u| u.user_name.canonical() == user_name.canonical())
            .cloned())
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        Ok(self
            .store
            .lock()
            .unwrap()
            .users
            .iter()
            .any(|u| u.user_name.canonical() == user_name.canonical()))
    }
}

impl SessionRepository for InMemoryAuthRepo {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        self.store.lock().unwrap().sessions.push(session.clone());
        Ok(())
    }

    async fn find_session(&self, session_id: SessionId) -> AuthResult<Option<Session>> {
        if self.fail_find_session.load(Ordering::SeqCst) {
            return Err(AuthError::Internal(
                "injected session lookup failure".into(),
            ));
        }
        Ok(self.session(session_id))
    }

    async fn save_session(&self, session: &Session) -> AuthResult<()> {
        let mut store = self.store.lock().unwrap();
        let Some(stored) = store
            .sessions
            .iter_mut()
            .find(|s| s.session_id == session.session_id)
        else {
            return Err(AuthError::SessionInvalid);
        };
        stored.user_id = session.user_id;
        stored.data = session.data.clone();
        stored.expires_at_ms = session.expires_at_ms;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn touch_session(&self, session_id: SessionId, expires_at_ms: i64) -> AuthResult<()> {
        let mut store = self.store.lock().unwrap();
        let Some(stored) = store
            .sessions
            .iter_mut()
            .find(|s| s.session_id == session_id)
        else {
            return Err(AuthError::SessionInvalid);
        };
        stored.expires_at_ms = expires_at_ms;
        stored.updated_at = Utc::now();
        Ok(())
    }

    async fn delete_session(&self, session_id: SessionId) -> AuthResult<()> {
        self.store
            .lock()
            .unwrap()
            .sessions
            .retain(|s| s.session_id != session_id);
        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();
        let mut store = self.store.lock().unwrap();
        let before = store.sessions.len();
        store.sessions.retain(|s| s.expires_at_ms >= now_ms);
        Ok((before - store.sessions.len()) as u64)
    }
}

/// Renderer that echoes the view name and data so tests can assert on
/// what reached the template.
pub(crate) struct StubRenderer;

impl kernel::render::Renderer for StubRenderer {
    fn render(&self, view: &str, data: serde_json::Value) -> kernel::error::app_error::AppResult<String> {
        Ok(format!("view={view} data={data}"))
    }
}
