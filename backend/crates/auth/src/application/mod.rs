//! Application Layer
//!
//! The sign-up, sign-in and session-restore use cases, the token
//! codec, and the configuration they share.

pub mod config;
pub mod restore_session;
pub mod session_token;
pub mod sign_in;
pub mod sign_up;

// Re-exports
pub use config::AuthConfig;
pub use restore_session::{RestoreSessionUseCase, RestoredSession};
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
