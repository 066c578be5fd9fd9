//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::application::{
    AuthenticateInput, AuthenticateUseCase, DeleteUserUseCase, GetUserUseCase, RegisterInput,
    RegisterUseCase, UpdateUserInput, UpdateUserUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::AuthResult;
use crate::presentation::dto::{
    LoginRequest, RegisterRequest, TokenResponse, UpdateUserRequest, UserResponse,
};
use crate::presentation::middleware::Identity;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub tokens: Arc<TokenService>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            tokens: self.tokens.clone(),
            config: self.config.clone(),
        }
    }
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<impl IntoResponse>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;

    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());
    let user = use_case
        .execute(RegisterInput {
            user_name: req.username,
            password: req.password,
            birth_date: req.birth_date,
            height: req.height,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

/// POST /auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<TokenResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;

    let use_case = AuthenticateUseCase::new(
        state.repo.clone(),
        state.tokens.clone(),
        state.config.clone(),
    );
    let output = use_case
        .execute(AuthenticateInput {
            user_name: req.username,
            password: req.password,
        })
        .await?;

    Ok(Json(TokenResponse {
        token: output.token,
    }))
}

// ============================================================================
// Current User
// ============================================================================

/// GET /users
pub async fn get_user<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = GetUserUseCase::new(state.repo.clone());
    let user = use_case.execute(&identity.user_name).await?;

    Ok(Json(UserResponse::from(user)))
}

/// PUT /users
pub async fn update_user<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
    body: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let Json(req) = body?;

    if req.username.is_some() {
        tracing::debug!(user_name = %identity.user_name, "Ignoring username in profile update");
    }

    let use_case = UpdateUserUseCase::new(state.repo.clone(), state.config.clone());
    use_case
        .execute(
            &identity.user_name,
            UpdateUserInput {
                birth_date: req.birth_date,
                height: req.height,
                password: req.password,
            },
        )
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /users
pub async fn delete_user<R>(
    State(state): State<AuthAppState<R>>,
    identity: Identity,
) -> AuthResult<StatusCode>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = DeleteUserUseCase::new(state.repo.clone());
    use_case.execute(&identity.user_name).await?;

    Ok(StatusCode::NO_CONTENT)
}
