//! Bearer credential extraction
//!
//! Reads `Authorization: Bearer <token>` from HTTP request headers.

use axum::http::{HeaderMap, header};

/// Authentication scheme prefix (RFC 6750)
pub const BEARER_SCHEME: &str = "Bearer";

/// Error when extracting a bearer credential
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BearerError {
    #[error("missing authorization header")]
    MissingHeader,

    #[error("authorization header must use the Bearer scheme")]
    InvalidScheme,

    #[error("bearer token is empty")]
    EmptyToken,
}

/// Extract the bearer token from request headers
///
/// The scheme name is matched case-insensitively; the token itself is
/// returned verbatim with surrounding whitespace removed.
///
/// ## Returns
/// * `Ok(&str)` - The raw token
/// * `Err(BearerError)` - Header absent, not UTF-8, wrong scheme or empty token
pub fn extract_bearer_token(headers: &HeaderMap) -> Result<&str, BearerError> {
    let value = headers
        .get(header::AUTHORIZATION)
        .ok_or(BearerError::MissingHeader)?
        .to_str()
        .map_err(|_| BearerError::InvalidScheme)?;

    let (scheme, token) = value
        .split_once(' ')
        .ok_or(BearerError::InvalidScheme)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME) {
        return Err(BearerError::InvalidScheme);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(BearerError::EmptyToken);
    }

    Ok(token)
}
