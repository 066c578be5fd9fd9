//! Auth Error Types
//!
//! This module provides auth-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::bearer::BearerError;
use platform::password::PasswordHashError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// A required input field is blank
    #[error("field {0} is required")]
    MissingField(&'static str),

    /// Input failed validation
    #[error("{0}")]
    InvalidInput(String),

    /// Request body could not be parsed
    #[error("Invalid request body")]
    InvalidBody(String),

    /// User name already exists among active users
    #[error("User with this username already exists")]
    UserNameTaken,

    /// No active user matches
    #[error("User not found")]
    UserNotFound,

    /// Invalid credentials (wrong password)
    #[error("Invalid login or password!")]
    InvalidCredentials,

    /// Authorization header absent or malformed
    #[error("{0}")]
    MissingCredentials(#[from] BearerError),

    /// Token is malformed, badly signed or uses an unexpected algorithm
    #[error("invalid token")]
    InvalidToken,

    /// Token is past its expiry
    #[error("token expired")]
    TokenExpired,

    /// Password hashing failed
    #[error("Password hashing failed: {0}")]
    PasswordHashing(#[from] PasswordHashError),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingField(_) | AuthError::InvalidInput(_) | AuthError::InvalidBody(_) => {
                ErrorKind::BadRequest
            }
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::InvalidCredentials
            | AuthError::MissingCredentials(_)
            | AuthError::InvalidToken
            | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::PasswordHashing(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::internal("Database error").with_source(e),
            AuthError::InvalidBody(detail) => {
                AppError::new(ErrorKind::BadRequest, "Invalid request body")
                    .with_developer_message(detail)
            }
            other => {
                let kind = other.kind();
                let message = other.to_string();
                if kind.is_server_error() {
                    AppError::new(kind, message.clone()).with_developer_message(message)
                } else {
                    AppError::new(kind, message)
                }
            }
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::PasswordHashing(e) => {
                tracing::error!(error = %e, "Password hashing error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken => {
                tracing::warn!("Rejected invalid bearer token");
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
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::InvalidBody(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_mapping() {
        assert_eq!(AuthError::MissingField("username").kind(), ErrorKind::BadRequest);
        assert_eq!(AuthError::UserNameTaken.kind(), ErrorKind::Conflict);
        assert_eq!(AuthError::UserNotFound.kind(), ErrorKind::NotFound);
        assert_eq!(AuthError::InvalidCredentials.kind(), ErrorKind::Unauthorized);
        assert_eq!(AuthError::TokenExpired.kind(), ErrorKind::Unauthorized);
        assert_eq!(
            AuthError::MissingCredentials(BearerError::MissingHeader).kind(),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            AuthError::Internal("boom".into()).kind(),
            ErrorKind::InternalServerError
        );
    }

    #[test]
    fn test_missing_field_message() {
        let err = AuthError::MissingField("password").into_app_error();
        assert_eq!(err.status_code(), 400);
        assert_eq!(err.client_message(), "field password is required");
    }

    #[test]
    fn test_internal_error_is_not_leaked() {
        let err = AuthError::Internal("pool poisoned".into()).into_app_error();
        assert_eq!(err.client_message(), "internal system error");
        assert_eq!(err.developer_message(), Some("Internal error: pool poisoned"));
    }

    #[test]
    fn test_database_errors_are_internal() {
        for source in [sqlx::Error::PoolTimedOut, sqlx::Error::RowNotFound] {
            let err = AuthError::Database(source);
            assert_eq!(err.kind(), ErrorKind::InternalServerError);

            let err = err.into_app_error();
            assert_eq!(err.status_code(), 500);
            assert_eq!(err.client_message(), "internal system error");
            assert!(err.developer_message().is_some());
        }
    }
}
