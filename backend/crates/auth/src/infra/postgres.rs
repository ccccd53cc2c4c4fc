//! Postgres persistence for the auth domain.
//!
//! One repository type backs both the user store and the session store.
//! Session payloads travel as a JSON TEXT column, so flash messages and
//! redirect targets need no schema of their own.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use platform::password::HashedPassword;

use crate::domain::entity::{session::Session, user::User};
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::domain::value_object::{session_id::SessionId, user_id::UserId, user_name::UserName};
use crate::error::{AuthError, AuthResult};

// Column lists shared by every query reading or writing a full row, in
// bind order.
const USER_COLUMNS: &str =
    "user_id, user_name, user_name_canonical, password_hash, created_at, updated_at";
const SESSION_COLUMNS: &str =
    "session_id, user_id, payload, expires_at_ms, created_at, updated_at";

/// PostgreSQL-backed auth repository
#[derive(Clone)]
pub struct PgAuthRepository {
    pool: PgPool,
}

impl PgAuthRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgAuthRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        sqlx::query(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(user.user_id.as_uuid())
        .bind(user.user_name.original())
        .bind(user.user_name.canonical())
        .bind(user.password_hash.as_phc_string())
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .map(UserRow::into_user)
        .transpose()
    }

    async fn find_by_user_name(&self, user_name: &UserName) -> AuthResult<Option<User>> {
        sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE user_name_canonical = $1"
        ))
        .bind(user_name.canonical())
        .fetch_optional(&self.pool)
        .await?
        .map(UserRow::into_user)
        .transpose()
    }

    async fn exists_by_user_name(&self, user_name: &UserName) -> AuthResult<bool> {
        let taken = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM users WHERE user_name_canonical = $1)",
        )
        .bind(user_name.canonical())
        .fetch_one(&self.pool)
        .await?;

        Ok(taken)
    }
}

// ============================================================================
// Session Repository Implementation
// ============================================================================

impl SessionRepository for PgAuthRepository {
    async fn create_session(&self, session: &Session) -> AuthResult<()> {
        sqlx::query(&format!(
            "INSERT INTO sessions ({SESSION_COLUMNS}) VALUES ($1, $2, $3, $4, $5, $6)"
        ))
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_ref().map(|id| id.as_uuid()))
        .bind(serde_json::to_string(&session.data)?)
        .bind(session.expires_at_ms)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: SessionId) -> AuthResult<Option<Session>> {
        sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE session_id = $1"
        ))
        .bind(session_id.as_uuid())
        .fetch_optional(&self.pool)
        .await?
        .map(SessionRow::into_session)
        .transpose()
    }

    async fn save_session(&self, session: &Session) -> AuthResult<()> {
        // Expiry is deliberately left alone; extending it is the
        // touch path's job
        let updated = sqlx::query(
            "UPDATE sessions SET user_id = $2, payload = $3, updated_at = $4 WHERE session_id = $1",
        )
        .bind(session.session_id.as_uuid())
        .bind(session.user_id.as_ref().map(|id| id.as_uuid()))
        .bind(serde_json::to_string(&session.data)?)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        // Zero rows means the row expired and was swept underneath us;
        // callers treat that as an invalid session, not a silent no-op.
        if updated == 0 {
            return Err(AuthError::SessionInvalid);
        }

        Ok(())
    }

    async fn touch_session(&self, session_id: SessionId, expires_at_ms: i64) -> AuthResult<()> {
        sqlx::query("UPDATE sessions SET expires_at_ms = $2, updated_at = $3 WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .bind(expires_at_ms)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_session(&self, session_id: SessionId) -> AuthResult<()> {
        sqlx::query("DELETE FROM sessions WHERE session_id = $1")
            .bind(session_id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM sessions WHERE expires_at_ms < $1")
            .bind(Utc::now().timestamp_millis())
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: Uuid,
    user_name: String,
    // Selected because the column lists double as insert lists; the
    // canonical form is recomputed from user_name on the way out.
    #[allow(dead_code)]
    user_name_canonical: String,
    password_hash: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash).map_err(|_| {
            AuthError::Internal(format!("Corrupt password hash for user {}", self.user_id))
        })?;

        Ok(User {
            user_id: UserId::from_uuid(self.user_id),
            user_name: UserName::from_db(&self.user_name),
            password_hash,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SessionRow {
    session_id: Uuid,
    user_id: Option<Uuid>,
    payload: String,
    expires_at_ms: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl SessionRow {
    fn into_session(self) -> AuthResult<Session> {
        Ok(Session {
            session_id: SessionId::from_uuid(self.session_id),
            user_id: self.user_id.map(UserId::from_uuid),
            data: serde_json::from_str(&self.payload)?,
            expires_at_ms: self.expires_at_ms,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
