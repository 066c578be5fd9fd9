//! Token Service
//!
//! Issues and validates HS256-signed, time-limited bearer tokens whose
//! subject is the user name.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::application::config::{AuthConfig, MAX_TOKEN_TTL};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// The only accepted signing algorithm
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Token claims
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    /// User name
    pub sub: String,
    /// Issued at (epoch seconds)
    pub iat: i64,
    /// Expiry (epoch seconds)
    pub exp: i64,
}

/// Token service holding the signing keys
///
/// Built once at startup and shared behind an `Arc`.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}

impl TokenService {
    /// Create a token service from an explicit secret
    ///
    /// The TTL is clamped to [`MAX_TOKEN_TTL`]. An empty secret is rejected.
    pub fn new(secret: &[u8], ttl: Duration) -> AuthResult<Self> {
        if secret.is_empty() {
            return Err(AuthError::Internal(
                "token signing secret must not be empty".to_string(),
            ));
        }

        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            ttl: ttl.min(MAX_TOKEN_TTL),
        })
    }

    /// Create a token service from the auth configuration
    pub fn from_config(config: &AuthConfig) -> AuthResult<Self> {
        Self::new(&config.token_secret, config.effective_token_ttl())
    }

    /// Effective token lifetime
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Issue a token for the subject, valid from now
    pub fn issue(&self, subject: &UserName) -> AuthResult<String> {
        self.issue_at(subject, Utc::now())
    }

    /// Issue a token as if it had been issued at `issued_at`
    pub fn issue_at(&self, subject: &UserName, issued_at: DateTime<Utc>) -> AuthResult<String> {
        let ttl = chrono::Duration::from_std(self.ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid token TTL: {}", e)))?;

        let claims = Claims {
            sub: subject.as_str().to_string(),
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        };

        encode(&Header::new(ALGORITHM), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Token encoding failed: {}", e)))
    }

    /// Validate a token and return its subject
    ///
    /// ## Errors
    /// * `TokenExpired` - past the expiry
    /// * `InvalidToken` - malformed, bad signature or unexpected algorithm
    pub fn validate(&self, token: &str) -> AuthResult<UserName> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            },
        )?;

        UserName::new(&data.claims.sub).map_err(|_| AuthError::InvalidToken)
    }
}
