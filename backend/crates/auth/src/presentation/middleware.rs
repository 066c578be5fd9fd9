//! Auth Middleware
//!
//! Bearer-token gate for protected routes and the `Identity` extractor
//! handlers use to learn who is calling.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::Response;
use platform::bearer::extract_bearer_token;

use crate::application::token::TokenService;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthError;

/// Authenticated caller, inserted into request extensions by [`require_bearer`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_name: UserName,
}

/// Middleware that requires a valid bearer token
///
/// Use with `axum::middleware::from_fn_with_state(tokens, require_bearer)`.
/// The wrapped handler never runs when the token is missing or invalid.
pub async fn require_bearer(
    State(tokens): State<Arc<TokenService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    let token = extract_bearer_token(req.headers())?;
    let user_name = tokens.validate(token)?;

    tracing::debug!(user_name = %user_name, "Bearer token accepted");

    req.extensions_mut().insert(Identity { user_name });

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AuthError::InvalidToken)
    }
}
