//! Router assembly
//!
//! Route table, fallback and the middleware stack shared by every route.

use std::sync::Arc;
use std::time::Duration;

use auth::{AuthConfig, TokenService, UserRepository, auth_router};
use axum::Router;
use axum::http::{HeaderValue, Method, StatusCode, header};
use journal::{WorkoutRepository, journal_router};
use kernel::error::app_error::AppError;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

/// Upper bound on handling a single request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Build the application router over any storage backend
pub fn build_app<U, W>(
    users: Arc<U>,
    workouts: Arc<W>,
    tokens: Arc<TokenService>,
    auth_config: Arc<AuthConfig>,
    frontend_origins: Vec<HeaderValue>,
) -> Router
where
    U: UserRepository + Send + Sync + 'static,
    W: WorkoutRepository + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(frontend_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true);

    Router::new()
        .merge(auth_router(users.clone(), tokens.clone(), auth_config))
        .merge(journal_router(workouts, users, tokens))
        .fallback(not_found)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            REQUEST_TIMEOUT,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

async fn not_found() -> AppError {
    AppError::not_found("Resource not found")
}
