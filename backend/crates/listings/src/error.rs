//! Listings Error Types
//!
//! Failures of the listings domain, each mapped onto one
//! [`kernel::error::kind::ErrorKind`] so the HTTP boundary stays uniform.
//!
//! Display strings double as flash messages shown to the visitor, so
//! they stay short and end-user friendly. Handlers usually catch the
//! soft variants (`ListingNotFound`, `AuthorizationDenied`, ...) and
//! turn them into a flash + redirect instead of an error page.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Listings-specific result type alias
pub type ListingsResult<T> = Result<T, ListingsError>;

/// Listings-specific error variants
#[derive(Debug, Error)]
pub enum ListingsError {
    /// Create form submitted without an image file
    #[error("Image upload failed!")]
    MissingImage,

    /// No listing with the requested id
    #[error("Cannot find that listing!")]
    ListingNotFound,

    /// No review with the requested id under this listing
    #[error("Cannot find that review!")]
    ReviewNotFound,

    /// Actor is neither the owner nor otherwise allowed to act
    #[error("You do not have permission to do that!")]
    AuthorizationDenied,

    /// Submitted field failed validation
    #[error("{0}")]
    Validation(String),

    /// Image bytes could not be written or served
    #[error("Image storage failed: {0}")]
    Storage(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ListingsError {
    /// Classify the failure; the status code follows from this
    pub fn kind(&self) -> ErrorKind {
        match self {
            ListingsError::MissingImage | ListingsError::Validation(_) => ErrorKind::BadRequest,
            ListingsError::ListingNotFound | ListingsError::ReviewNotFound => ErrorKind::NotFound,
            ListingsError::AuthorizationDenied => ErrorKind::Forbidden,
            ListingsError::Storage(_) | ListingsError::Database(_) | ListingsError::Internal(_) => {
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

    /// Server faults log at error, denied actions at warn,
    /// user mistakes at debug
    fn log(&self) {
        match self {
            ListingsError::Database(e) => {
                tracing::error!(error = %e, "Listings database error");
            }
            ListingsError::Storage(msg) => {
                tracing::error!(message = %msg, "Image storage error");
            }
            ListingsError::Internal(msg) => {
                tracing::error!(message = %msg, "Listings internal error");
            }
            ListingsError::AuthorizationDenied => {
                tracing::warn!("Rejected an unauthorized listings action");
            }
            _ => {
                tracing::debug!(error = %self, "Listings error");
            }
        }
    }
}

impl IntoResponse for ListingsError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for ListingsError {
    fn from(err: AppError) -> Self {
        ListingsError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(ListingsError::MissingImage.kind(), ErrorKind::BadRequest);
        assert_eq!(
            ListingsError::Validation("price must be a number".into()).kind(),
            ErrorKind::BadRequest
        );
        assert_eq!(ListingsError::ListingNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(ListingsError::ReviewNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(
            ListingsError::AuthorizationDenied.kind(),
            ErrorKind::Forbidden
        );
        assert_eq!(
            ListingsError::Storage("disk full".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_status_follows_kind() {
        assert_eq!(
            ListingsError::ListingNotFound.status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ListingsError::AuthorizationDenied.status_code(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_messages_read_like_flash_text() {
        assert_eq!(
            ListingsError::ListingNotFound.to_string(),
            "Cannot find that listing!"
        );
        assert_eq!(
            ListingsError::AuthorizationDenied.to_string(),
            "You do not have permission to do that!"
        );
    }

    #[test]
    fn test_to_app_error_keeps_message() {
        let app = ListingsError::ReviewNotFound.to_app_error();
        assert_eq!(app.message(), "Cannot find that review!");
        assert_eq!(app.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_to_app_error_masks_server_faults() {
        let app = ListingsError::Storage("disk full".into()).to_app_error();
        assert_eq!(app.message(), "Something went wrong!");
    }
}
