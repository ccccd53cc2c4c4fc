//! Domain Layer
//!
//! Entities, value objects, repository seams, and the credential
//! verification capability.

pub mod auth_state;
pub mod entity;
pub mod repository;
pub mod value_object;
pub mod verifier;

// Re-exports
pub use auth_state::{AuthState, CurrentUser};
pub use entity::{
    session::{FlashBag, Session, SessionData},
    user::User,
};
pub use repository::{SessionRepository, UserRepository};
pub use verifier::{CredentialVerifier, PasswordVerifier};
