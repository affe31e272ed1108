//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use kernel::form::FormErrors;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Where anonymous visitors are sent
pub const LOGIN_PATH: &str = "/login";

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// Email already registered
    #[error("Email already registered")]
    DuplicateEmail,

    /// Display name already taken
    #[error("Name already taken")]
    DuplicateName,

    /// Unknown email or wrong password (deliberately indistinguishable)
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Session not found, expired or badly signed
    #[error("Session not found or expired")]
    SessionInvalid,

    /// No session on a protected route
    #[error("Login required")]
    AuthRequired,

    /// Submitted form failed validation
    #[error(transparent)]
    Validation(#[from] FormErrors),

    /// Password validation error
    #[error("Password validation failed: {0}")]
    PasswordPolicy(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AuthError::DuplicateEmail | AuthError::DuplicateName => StatusCode::CONFLICT,
            AuthError::InvalidCredentials => StatusCode::UNAUTHORIZED,
            AuthError::SessionInvalid | AuthError::AuthRequired => StatusCode::SEE_OTHER,
            AuthError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AuthError::PasswordPolicy(_) => StatusCode::BAD_REQUEST,
            AuthError::Database(_) | AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::DuplicateEmail | AuthError::DuplicateName => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::SessionInvalid | AuthError::AuthRequired => {
                ErrorKind::Unauthorized
            }
            AuthError::Validation(_) => ErrorKind::UnprocessableEntity,
            AuthError::PasswordPolicy(_) => ErrorKind::BadRequest,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    ///
    /// Store and internal details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Something went wrong").with_action("Please try again")
            }
            AuthError::DuplicateEmail => {
                AppError::conflict(self.to_string()).with_action("Please log in")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
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
        match self {
            AuthError::AuthRequired | AuthError::SessionInvalid => {
                Redirect::to(LOGIN_PATH).into_response()
            }
            other => other.to_app_error().into_response(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_status_mapping() {
        assert_eq!(AuthError::DuplicateEmail.status_code(), StatusCode::CONFLICT);
        assert_eq!(AuthError::InvalidCredentials.status_code(), StatusCode::UNAUTHORIZED);
        assert_eq!(AuthError::Internal("x".into()).kind(), ErrorKind::InternalServerError);
        assert_eq!(AuthError::PasswordPolicy("x".into()).kind(), ErrorKind::BadRequest);
    }

    #[test]
    fn test_auth_required_redirects_to_login() {
        let response = AuthError::AuthRequired.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[test]
    fn test_internal_details_are_hidden() {
        let err = AuthError::Internal("db file locked at /var/lib".into());
        let app = err.to_app_error();
        assert_eq!(app.status_code(), 500);
        assert!(!app.message().contains("/var/lib"));
    }

    #[test]
    fn test_validation_error_is_unprocessable() {
        use kernel::form::FieldError;
        let err: AuthError = FormErrors::single("register", FieldError::new("name", "taken")).into();
        assert_eq!(err.status_code(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(err.into_response().status(), StatusCode::UNPROCESSABLE_ENTITY);
    }
}
