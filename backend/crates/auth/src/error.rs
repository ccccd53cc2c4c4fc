//! Auth Error Types
//!
//! Failures of the auth domain, each mapped onto one
//! [`kernel::error::kind::ErrorKind`] so the HTTP boundary stays uniform.
//!
//! `UnknownUser` and `InvalidCredential` are separate variants so logs
//! can tell them apart, but they share one Display message: a login
//! failure must not reveal whether the user name exists.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No account for the supplied user name
    #[error("Invalid username or password")]
    UnknownUser,

    /// Password verification failed for an existing account
    #[error("Invalid username or password")]
    InvalidCredential,

    /// User name already exists
    #[error("Username is already taken")]
    UserNameTaken,

    /// User name failed validation
    #[error("{0}")]
    InvalidUserName(String),

    /// Password failed policy validation
    #[error("{0}")]
    PasswordValidation(String),

    /// Session token malformed, forged, or referencing a dead session
    #[error("Session not found or expired")]
    SessionInvalid,

    /// Session payload could not be encoded or decoded
    #[error("Session payload error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Classify the failure; the status code follows from this
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UnknownUser
            | AuthError::InvalidCredential
            | AuthError::SessionInvalid => ErrorKind::Unauthorized,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::InvalidUserName(_) | AuthError::PasswordValidation(_) => {
                ErrorKind::BadRequest
            }
            AuthError::Serialization(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Status code derived from [`Self::kind`], so the two can never drift
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Lift into the kernel error for response rendering
    ///
    /// Server faults collapse to the generic message; the detail goes
    /// to the logs, never to the page.
    pub fn to_app_error(&self) -> AppError {
        if self.kind().is_server_error() {
            return AppError::unhandled();
        }
        AppError::new(self.kind(), self.to_string())
    }

    /// Server faults log at error, enumeration probes at warn,
    /// user mistakes at debug
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth query failed");
            }
            AuthError::Serialization(e) => {
                tracing::error!(error = %e, "Session payload error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::UnknownUser => {
                tracing::warn!("Login attempt for unknown user");
            }
            AuthError::InvalidCredential => {
                tracing::warn!("Invalid login attempt");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        AuthError::Internal(err.to_string())
    }
}
