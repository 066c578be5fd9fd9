//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).
//! Invalid values abort startup.

use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;
use auth::application::config::DEFAULT_TOKEN_TTL;
use axum::http::HeaderValue;
use platform::crypto::from_base64;

const DEFAULT_BIND_IP: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_SOCKET_NAME: &str = "app.sock";
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_CONNECT_ATTEMPTS: u32 = 5;
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:3000,http://127.0.0.1:3000";

/// Where the server listens
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListenAddr {
    Tcp(SocketAddr),
    Unix(PathBuf),
}

/// PostgreSQL settings; absent when `DATABASE_URL` is unset
#[derive(Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub connect_attempts: u32,
}

impl std::fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabaseConfig")
            .field("url", &"[REDACTED]")
            .field("max_connections", &self.max_connections)
            .field("connect_attempts", &self.connect_attempts)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen: ListenAddr,
    pub database: Option<DatabaseConfig>,
    pub auth: AuthConfig,
    pub frontend_origins: Vec<HeaderValue>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok().filter(|v| !v.trim().is_empty()))
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self {
            listen: listen_addr(&lookup)?,
            database: database(&lookup)?,
            auth: auth(&lookup)?,
            frontend_origins: frontend_origins(&lookup)?,
        })
    }
}

fn parse_or<T, F>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{} has an invalid value: {:?}", key, raw)),
        None => Ok(default),
    }
}

fn listen_addr<F>(lookup: &F) -> anyhow::Result<ListenAddr>
where
    F: Fn(&str) -> Option<String>,
{
    let listen_type = lookup("LISTEN_TYPE").unwrap_or_else(|| "tcp".to_string());

    match listen_type.trim() {
        "tcp" => {
            let ip: IpAddr = parse_or(lookup, "BIND_IP", DEFAULT_BIND_IP.parse()?)?;
            let port: u16 = parse_or(lookup, "PORT", DEFAULT_PORT)?;
            Ok(ListenAddr::Tcp(SocketAddr::new(ip, port)))
        }
        "sock" => {
            let path = match lookup("SOCKET_PATH") {
                Some(path) => PathBuf::from(path),
                None => {
                    let exe = env::current_exe().context("cannot locate executable")?;
                    exe.parent()
                        .map(|dir| dir.join(DEFAULT_SOCKET_NAME))
                        .unwrap_or_else(|| PathBuf::from(DEFAULT_SOCKET_NAME))
                }
            };
            Ok(ListenAddr::Unix(path))
        }
        other => bail!("LISTEN_TYPE must be \"tcp\" or \"sock\", got {:?}", other),
    }
}

fn database<F>(lookup: &F) -> anyhow::Result<Option<DatabaseConfig>>
where
    F: Fn(&str) -> Option<String>,
{
    let Some(url) = lookup("DATABASE_URL") else {
        return Ok(None);
    };

    let max_connections = parse_or(lookup, "DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?;
    let connect_attempts = parse_or(lookup, "DATABASE_CONNECT_ATTEMPTS", DEFAULT_CONNECT_ATTEMPTS)?;

    if max_connections == 0 {
        bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
    }
    if connect_attempts == 0 {
        bail!("DATABASE_CONNECT_ATTEMPTS must be at least 1");
    }

    Ok(Some(DatabaseConfig {
        url,
        max_connections,
        connect_attempts,
    }))
}

fn auth<F>(lookup: &F) -> anyhow::Result<AuthConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup("JWT_SECRET") {
        Some(secret) => AuthConfig {
            token_secret: secret.into_bytes(),
            ..AuthConfig::default()
        },
        None if cfg!(debug_assertions) => {
            tracing::warn!("JWT_SECRET not set, using a random secret for this process");
            AuthConfig::development()
        }
        None => bail!("JWT_SECRET must be set in production"),
    };

    let ttl_secs = parse_or(lookup, "JWT_TTL_SECS", DEFAULT_TOKEN_TTL.as_secs())?;
    if ttl_secs == 0 {
        bail!("JWT_TTL_SECS must be at least 1");
    }
    config.token_ttl = Duration::from_secs(ttl_secs);

    if let Some(pepper_b64) = lookup("PASSWORD_PEPPER") {
        let pepper =
            from_base64(pepper_b64.trim()).context("PASSWORD_PEPPER must be valid base64")?;
        config.password_pepper = Some(pepper);
    }

    Ok(config)
}

fn frontend_origins<F>(lookup: &F) -> anyhow::Result<Vec<HeaderValue>>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup("FRONTEND_ORIGINS").unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string());

    raw.split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("FRONTEND_ORIGINS contains an invalid origin: {:?}", origin))
        })
        .collect()
}
