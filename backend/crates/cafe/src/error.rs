//! Cafe Error Types
//!
//! This module provides cafe-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::form::FormErrors;
use thiserror::Error;

/// Cafe-specific result type alias
pub type CafeResult<T> = Result<T, CafeError>;

/// Cafe-specific error variants
#[derive(Debug, Error)]
pub enum CafeError {
    /// Submitted fields failed validation
    #[error(transparent)]
    Validation(#[from] FormErrors),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CafeError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            CafeError::Validation(_) => ErrorKind::UnprocessableEntity,
            CafeError::Database(sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed) => {
                ErrorKind::ServiceUnavailable
            }
            CafeError::Database(_) => ErrorKind::InternalServerError,
            CafeError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            CafeError::Validation(errors) => AppError::unprocessable(errors.to_string())
                .with_action("Correct the highlighted fields"),
            _ => AppError::new(self.kind(), "Something went wrong").with_action("Please try again"),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            CafeError::Database(e) => {
                tracing::error!(error = %e, "Cafe database error");
            }
            CafeError::Internal(msg) => {
                tracing::error!(message = %msg, "Cafe internal error");
            }
            CafeError::Validation(errors) => {
                tracing::debug!(fields = errors.len(), "Cafe validation failed");
            }
        }
    }
}

impl IntoResponse for CafeError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::form::FieldError;

    #[test]
    fn test_validation_maps_to_422() {
        let err: CafeError =
            FormErrors::single("add_cafe", FieldError::new("location", "Invalid URL.")).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.kind(), ErrorKind::UnprocessableEntity);
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_pool_timeout_is_service_unavailable() {
        let err = CafeError::Database(sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind(), ErrorKind::ServiceUnavailable);
        assert_eq!(err.into_response().status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_internal_message_is_generic() {
        let app = CafeError::Internal("disk full".into()).to_app_error();
        assert_eq!(app.status_code(), 500);
        assert_eq!(app.message(), "Something went wrong");
    }
}
