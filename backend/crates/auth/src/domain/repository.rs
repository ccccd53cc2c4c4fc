//! Repository Traits
//!
//! Persistence seams the application layer talks through; the Postgres
//! implementations live in `infra`.

use crate::domain::entity::{session::Session, user::User};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId, user_name::UserName};
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a freshly registered user
    async fn create(&self, user: &User) -> AuthResult<()>;

    /// Look up by internal id
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Look up by name, compared in canonical form
    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>>;

    /// Whether a name is already taken, compared in canonical form
    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool>;
}

/// Session repository trait
///
/// The split between `save_session` and `touch_session` matters: a save
/// rewrites the payload, a touch only refreshes activity and expiry for
/// sessions that were read but not modified.
#[trait_variant::make(SessionRepository: Send)]
pub trait LocalSessionRepository {
    /// Create a new session row
    async fn create_session(&self, session: &Session) -> AuthResult<()>;

    /// Load a session by ID
    async fn find_session(&self, session_id: SessionId) -> AuthResult<Option<Session>>;

    /// Persist payload and user binding of an existing session
    async fn save_session(&self, session: &Session) -> AuthResult<()>;

    /// Refresh activity timestamp and expiry without rewriting the payload
    async fn touch_session(&self, session_id: SessionId, expires_at_ms: i64) -> AuthResult<()>;

    /// Delete a session
    async fn delete_session(&self, session_id: SessionId) -> AuthResult<()>;

    /// Remove expired session rows, returning how many were deleted
    async fn cleanup_expired(&self) -> AuthResult<u64>;
}
