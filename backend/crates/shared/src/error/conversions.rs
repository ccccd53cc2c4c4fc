//! Error Conversions
//!
//! Lets `?` lift std, serde_json and sqlx failures straight into
//! [`AppError`] at the HTTP boundary. The original error always rides
//! along as `source`, so nothing is lost to the logs.

use super::app_error::AppError;
use super::kind::ErrorKind;

// ============================================================================
// Standard library conversions
// ============================================================================

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        use std::io::ErrorKind as IoKind;

        let kind = match err.kind() {
            IoKind::NotFound => ErrorKind::NotFound,
            IoKind::PermissionDenied => ErrorKind::Forbidden,
            IoKind::TimedOut => ErrorKind::ServiceUnavailable,
            _ => ErrorKind::InternalServerError,
        };
        AppError::new(kind, "File operation failed").with_source(err)
    }
}

impl From<std::fmt::Error> for AppError {
    fn from(err: std::fmt::Error) -> Self {
        AppError::internal("Could not format output").with_source(err)
    }
}

impl From<std::string::FromUtf8Error> for AppError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        AppError::bad_request("Text is not valid UTF-8").with_source(err)
    }
}

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Expected a whole number").with_source(err)
    }
}

// ============================================================================
// serde_json conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        // Syntax and shape problems are the caller's fault, the rest is ours
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("Malformed JSON: {err}")).with_source(err)
        } else {
            AppError::internal("JSON encoding failed").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Map a PostgreSQL error code (SQLSTATE) to a user-facing error.
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
#[cfg(feature = "sqlx")]
fn pg_code_error(code: &str) -> AppError {
    match code {
        // Class 23: integrity constraint violations
        "23000" => AppError::conflict("Integrity constraint violation"),
        "23502" => AppError::bad_request("Required field is null"),
        "23503" => AppError::conflict("Foreign key violation"),
        "23505" => AppError::conflict("Duplicate key value"),
        "23514" => AppError::bad_request("Check constraint violation"),
        // Class 42: access rule violations
        "42501" => AppError::forbidden("Insufficient privilege"),
        // Class 53: insufficient resources
        "53000" | "53100" | "53200" | "53300" => {
            AppError::service_unavailable("Database resource exhausted")
        }
        // Class 57: operator intervention (shutdown, cancel)
        "57000" | "57014" | "57P01" | "57P02" | "57P03" => {
            AppError::service_unavailable("Database unavailable")
        }
        _ => AppError::internal("Database error"),
    }
}

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let mapped = match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found"),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted")
            }
            sqlx::Error::Database(db_err) => match db_err.code() {
                Some(code) => pg_code_error(code.as_ref()),
                None => AppError::internal("Database error"),
            },
            sqlx::Error::Io(_) => AppError::service_unavailable("Database connection error"),
            sqlx::Error::Protocol(_) => AppError::internal("Database protocol error"),
            sqlx::Error::Tls(_) => AppError::internal("Database TLS error"),
            _ => AppError::internal("Database error"),
        };
        mapped.with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use super::app_error::ErrorContext;
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        // Normalized error shape; the error-page stage re-renders it from
        // the ErrorContext extension.
        let body = serde_json::json!({
            "statusCode": self.status_code(),
            "message": self.message(),
        });

        let mut response = (status, Json(body)).into_response();
        response.extensions_mut().insert(ErrorContext::from(&self));
        response
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_errors_pick_matching_kinds() {
        let cases = [
            (std::io::ErrorKind::NotFound, ErrorKind::NotFound),
            (std::io::ErrorKind::PermissionDenied, ErrorKind::Forbidden),
            (std::io::ErrorKind::TimedOut, ErrorKind::ServiceUnavailable),
            (std::io::ErrorKind::BrokenPipe, ErrorKind::InternalServerError),
        ];
        for (io_kind, expected) in cases {
            let app_err: AppError = std::io::Error::new(io_kind, "boom").into();
            assert_eq!(app_err.kind(), expected);
        }
    }

    #[test]
    fn test_parse_int_error_is_bad_request() {
        let parse_err: Result<i32, _> = "forty-two".parse();
        let app_err: AppError = parse_err.unwrap_err().into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_json_syntax_error_is_bad_request() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_row_not_found_is_404() {
        let app_err: AppError = sqlx::Error::RowNotFound.into();
        assert_eq!(app_err.kind(), ErrorKind::NotFound);
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_pg_unique_violation_is_conflict() {
        assert_eq!(pg_code_error("23505").kind(), ErrorKind::Conflict);
        assert_eq!(pg_code_error("53300").kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(pg_code_error("XX000").kind(), ErrorKind::InternalServerError);
    }

    #[cfg(feature = "axum")]
    #[test]
    fn test_into_response_attaches_error_context() {
        use super::super::app_error::ErrorContext;
        use axum::response::IntoResponse;

        let response = AppError::not_found("Record not found").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let ctx = response.extensions().get::<ErrorContext>().unwrap();
        assert_eq!(ctx.status_code, 404);
        assert_eq!(ctx.message, "Record not found");
    }
}
