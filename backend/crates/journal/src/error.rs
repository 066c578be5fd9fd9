//! Journal Error Types
//!
//! This module provides journal-specific error variants that integrate
//! with the unified `kernel::error::AppError` system.

use auth::AuthError;
use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Journal-specific result type alias
pub type JournalResult<T> = Result<T, JournalError>;

/// Journal-specific error variants
#[derive(Debug, Error)]
pub enum JournalError {
    /// No workout with this ID is visible to the caller
    #[error("workout not found")]
    WorkoutNotFound,

    /// No exercise with this ID in the workout
    #[error("exercise not found")]
    ExerciseNotFound,

    /// No set with this ID in the exercise
    #[error("set not found")]
    SetNotFound,

    /// A required input field is blank
    #[error("field {0} is required")]
    MissingField(&'static str),

    /// Set payload failed validation
    #[error("{0}")]
    InvalidSet(String),

    /// Request body could not be parsed
    #[error("Invalid request body")]
    InvalidBody(String),

    /// Path parameter could not be parsed
    #[error("Invalid path parameter")]
    InvalidPath(String),

    /// Version check failed on write
    #[error("workout was modified concurrently")]
    ConcurrentModification,

    /// Resolving the caller failed
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// Exercise document could not be (de)serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl JournalError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            JournalError::WorkoutNotFound
            | JournalError::ExerciseNotFound
            | JournalError::SetNotFound => ErrorKind::NotFound,
            JournalError::MissingField(_)
            | JournalError::InvalidSet(_)
            | JournalError::InvalidBody(_)
            | JournalError::InvalidPath(_) => ErrorKind::BadRequest,
            JournalError::ConcurrentModification => ErrorKind::Conflict,
            JournalError::Auth(e) => e.kind(),
            JournalError::Serialization(_)
            | JournalError::Database(_)
            | JournalError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError
    pub fn into_app_error(self) -> AppError {
        match self {
            JournalError::Auth(e) => e.into_app_error(),
            JournalError::Database(e) => AppError::internal("Database error").with_source(e),
            // A stored document that fails to decode is a server-side fault
            JournalError::Serialization(e) => {
                AppError::internal("Exercise document error").with_source(e)
            }
            JournalError::InvalidBody(detail) => {
                AppError::bad_request("Invalid request body").with_developer_message(detail)
            }
            JournalError::InvalidPath(detail) => {
                AppError::bad_request("Invalid path parameter").with_developer_message(detail)
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
            JournalError::Database(e) => {
                tracing::error!(error = %e, "Journal database error");
            }
            JournalError::Serialization(e) => {
                tracing::error!(error = %e, "Exercise document serialization error");
            }
            JournalError::Internal(msg) => {
                tracing::error!(message = %msg, "Journal internal error");
            }
            JournalError::ConcurrentModification => {
                tracing::warn!("Workout write lost a version race");
            }
            _ => {
                tracing::debug!(error = %self, "Journal error");
            }
        }
    }
}

impl IntoResponse for JournalError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<JsonRejection> for JournalError {
    fn from(rejection: JsonRejection) -> Self {
        JournalError::InvalidBody(rejection.body_text())
    }
}

impl From<PathRejection> for JournalError {
    fn from(rejection: PathRejection) -> Self {
        JournalError::InvalidPath(rejection.body_text())
    }
}
