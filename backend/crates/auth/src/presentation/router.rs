//! Auth Router

use axum::{
    Router,
    middleware::from_fn_with_state,
    routing::{get, post},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::require_bearer;

/// Create the Auth router for any repository implementation
///
/// `/auth/*` is public; `/users` sits behind the bearer gate.
pub fn auth_router<R>(repo: Arc<R>, tokens: Arc<TokenService>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let state = AuthAppState {
        repo,
        tokens: tokens.clone(),
        config,
    };

    let public = Router::new()
        .route("/auth/register", post(handlers::register::<R>))
        .route("/auth/login", post(handlers::login::<R>));

    let protected = Router::new()
        .route(
            "/users",
            get(handlers::get_user::<R>)
                .put(handlers::update_user::<R>)
                .delete(handlers::delete_user::<R>),
        )
        .route_layer(from_fn_with_state(tokens, require_bearer));

    public.merge(protected).with_state(state)
}
