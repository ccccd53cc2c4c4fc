//! Session Entity
//!
//! Server-side session row referenced by a signed cookie token.
//! Carries the authenticated user (if any) plus a small JSON payload
//! holding flash messages and the post-login redirect target.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::value_object::{session_id::SessionId, user_id::UserId};

// ============================================================================
// Flash Messages
// ============================================================================

/// One-shot notification messages, grouped by channel.
///
/// Messages accumulate across requests and are consumed in one drain
/// at the next render. A drained bag is empty, so a message is shown
/// exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashBag {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub success: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub error: Vec<String>,
}

impl FlashBag {
    pub fn push_success(&mut self, message: impl Into<String>) {
        self.success.push(message.into());
    }

    pub fn push_error(&mut self, message: impl Into<String>) {
        self.error.push(message.into());
    }

    /// Take all pending messages, leaving the bag empty.
    pub fn drain(&mut self) -> FlashBag {
        std::mem::take(self)
    }

    pub fn is_empty(&self) -> bool {
        self.success.is_empty() && self.error.is_empty()
    }
}

// ============================================================================
// Session Payload
// ============================================================================

/// JSON payload stored alongside the session row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    #[serde(default)]
    pub flash: FlashBag,
    /// URL the user tried to reach before being sent to the login page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
}

impl SessionData {
    pub fn is_empty(&self) -> bool {
        self.flash.is_empty() && self.return_to.is_none()
    }
}

// ============================================================================
// Session Entity
// ============================================================================

/// Session entity
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// Session ID (UUID v4), signed into the cookie token
    pub session_id: SessionId,
    /// Authenticated user, absent for anonymous sessions
    pub user_id: Option<UserId>,
    /// Flash messages and redirect target
    pub data: SessionData,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
    /// Last persisted activity timestamp
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Create an anonymous session.
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    pub fn anonymous(ttl: Duration) -> Self {
        Self::build(None, SessionData::default(), ttl)
    }

    /// Create a session already bound to a user, e.g. right after login.
    pub fn for_user(user_id: UserId, data: SessionData, ttl: Duration) -> Self {
        Self::build(Some(user_id), data, ttl)
    }

    fn build(user_id: Option<UserId>, data: SessionData, ttl: Duration) -> Self {
        let now = Utc::now();

        Self {
            session_id: SessionId::new(),
            user_id,
            data,
            expires_at_ms: (now + ttl).timestamp_millis(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Check if the session has been idle long enough to warrant a
    /// persisted activity refresh. Unmodified sessions are only written
    /// back once per threshold window to keep read traffic cheap.
    pub fn needs_touch(&self, threshold: Duration) -> bool {
        Utc::now() - self.updated_at >= threshold
    }

    /// Drop the user binding, keeping payload and row alive.
    ///
    /// Used on logout and when the referenced account no longer exists.
    pub fn clear_identity(&mut self) {
        self.user_id = None;
    }

    /// Compute a fresh expiry for a session extended now.
    pub fn expiry_after(ttl: Duration) -> i64 {
        (Utc::now() + ttl).timestamp_millis()
    }
}
