//! Error conversions - From implementations for common error types
//!
//! Provides automatic conversion from common error types to [`AppError`],
//! and the axum response rendering of the error envelope.

use super::app_error::AppError;

// ============================================================================
// Serde conversions
// ============================================================================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() || err.is_eof() {
            AppError::bad_request("JSON parse error").with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

/// Storage failures are always server-side faults.
///
/// Conditions a caller can act on (duplicate names, missing rows) are
/// detected by the repositories before the error reaches this point.
#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        let message = match &err {
            sqlx::Error::PoolTimedOut => "Database connection pool exhausted",
            sqlx::Error::Io(_) => "Database connection error",
            sqlx::Error::Decode(_) | sqlx::Error::ColumnDecode { .. } => "Database decode error",
            _ => "Database error",
        };
        AppError::internal(message).with_source(err)
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::JsonRejection> for AppError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        AppError::bad_request("Invalid request body").with_developer_message(rejection.body_text())
    }
}

#[cfg(feature = "axum")]
impl From<axum::extract::rejection::PathRejection> for AppError {
    fn from(rejection: axum::extract::rejection::PathRejection) -> Self {
        AppError::bad_request("Invalid path parameter").with_developer_message(rejection.body_text())
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.envelope())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::kind::ErrorKind;

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let app_err: AppError = json_err.into();
        assert_eq!(app_err.kind(), ErrorKind::BadRequest);
        assert!(app_err.developer_message().is_some());
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_errors_are_internal() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        for err in [
            sqlx::Error::RowNotFound,
            sqlx::Error::PoolTimedOut,
            sqlx::Error::Io(io),
        ] {
            let app_err: AppError = err.into();
            assert_eq!(app_err.kind(), ErrorKind::InternalServerError);
            assert_eq!(app_err.status_code(), 500);
            assert_eq!(app_err.client_message(), "internal system error");
        }
    }

    #[cfg(feature = "sqlx")]
    #[test]
    fn test_sqlx_pool_timeout_keeps_detail() {
        let app_err: AppError = sqlx::Error::PoolTimedOut.into();
        assert!(std::error::Error::source(&app_err).is_some());
        assert!(app_err.developer_message().is_some());
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_renders_envelope() {
        use axum::response::IntoResponse;

        let response = AppError::not_found("exercise not found").into_response();
        assert_eq!(response.status(), axum::http::StatusCode::NOT_FOUND);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json, serde_json::json!({ "message": "exercise not found" }));
    }

    #[cfg(feature = "axum")]
    #[tokio::test]
    async fn test_into_response_hides_server_error_text() {
        use axum::response::IntoResponse;

        let response = AppError::internal("connection reset by peer").into_response();
        assert_eq!(
            response.status(),
            axum::http::StatusCode::INTERNAL_SERVER_ERROR
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["message"], "internal system error");
        assert_eq!(json["developer_message"], "connection reset by peer");
    }
}
