//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::fmt;
use std::time::Duration;

/// Token lifetime when none is configured
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(5 * 60);

/// Upper bound applied to any configured token lifetime
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(60 * 60);

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// Symmetric signing secret for HS256 tokens
    pub token_secret: Vec<u8>,
    /// Token lifetime (clamped to [`MAX_TOKEN_TTL`])
    pub token_ttl: Duration,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_secret: Vec::new(),
            token_ttl: DEFAULT_TOKEN_TTL,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Create config with a random signing secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_bytes(32),
            ..Default::default()
        }
    }

    /// Create config for development
    pub fn development() -> Self {
        Self::with_random_secret()
    }

    /// Token lifetime after clamping
    pub fn effective_token_ttl(&self) -> Duration {
        self.token_ttl.min(MAX_TOKEN_TTL)
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }
}

impl fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthConfig")
            .field("token_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field(
                "password_pepper",
                &self.password_pepper.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_empty_secret() {
        let config = AuthConfig::default();
        assert!(config.token_secret.is_empty());
        assert_eq!(config.token_ttl, DEFAULT_TOKEN_TTL);
    }

    #[test]
    fn test_development_has_random_secret() {
        let a = AuthConfig::development();
        let b = AuthConfig::development();
        assert_eq!(a.token_secret.len(), 32);
        assert_ne!(a.token_secret, b.token_secret);
    }

    #[test]
    fn test_ttl_is_clamped() {
        let config = AuthConfig {
            token_ttl: Duration::from_secs(24 * 3600),
            ..AuthConfig::development()
        };
        assert_eq!(config.effective_token_ttl(), MAX_TOKEN_TTL);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let config = AuthConfig {
            password_pepper: Some(b"pepper".to_vec()),
            ..AuthConfig::development()
        };
        let debug = format!("{:?}", config);
        assert!(debug.contains("token_secret: \"[REDACTED]\""));
        assert!(debug.contains("password_pepper: Some(\"[REDACTED]\")"));
    }
}
