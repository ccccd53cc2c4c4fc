//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository traits
//! - `application/` - Use cases and application services
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, session middleware
//!
//! ## Features
//! - User signup/login with username + password
//! - Server-side sessions with HMAC-signed cookie tokens
//! - Flash messages and post-login redirect preservation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id (NIST SP 800-63B compliant)
//! - Session rotation on signup and login
//! - Login failures never reveal whether the username exists

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod test_support;

// The surface sibling crates and the binary program against
pub use application::config::AuthConfig;
pub use domain::auth_state::{AuthState, CurrentUser};
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgAuthRepository;
pub use presentation::context::SessionCtx;
pub use presentation::middleware::{SessionMiddlewareState, attach_session, require_auth};
pub use presentation::router::auth_router;

/// Domain types shared with sibling crates
pub mod models {
    pub use crate::domain::entity::session::{FlashBag, Session, SessionData};
    pub use crate::domain::entity::user::User;
    pub use crate::domain::value_object::session_id::SessionId;
    pub use crate::domain::value_object::user_id::UserId;
    pub use crate::domain::value_object::user_name::UserName;
    pub use crate::presentation::dto::*;
}

/// Middleware, addressable as `auth::middleware::require_auth`
pub mod middleware {
    pub use crate::presentation::middleware::*;
}
