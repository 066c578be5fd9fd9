//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;
mod db;


use std::sync::Arc;

use auth::{MemoryUserRepository, PgUserRepository, TokenService};
use axum::Router;
use journal::{MemoryWorkoutRepository, PgWorkoutRepository};
use tokio::net::{TcpListener, UnixListener};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::app::build_app;
use crate::config::{AppConfig, ListenAddr};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,journal=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let tokens = Arc::new(TokenService::from_config(&config.auth)?);
    let auth_config = Arc::new(config.auth.clone());

    let app = match &config.database {
        Some(database) => {
            let pool = db::connect(database).await?;
            db::migrate(&pool).await?;

            build_app(
                Arc::new(PgUserRepository::new(pool.clone())),
                Arc::new(PgWorkoutRepository::new(pool)),
                tokens,
                auth_config,
                config.frontend_origins.clone(),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            build_app(
                Arc::new(MemoryUserRepository::new()),
                Arc::new(MemoryWorkoutRepository::new()),
                tokens,
                auth_config,
                config.frontend_origins.clone(),
            )
        }
    };

    serve(app, &config.listen).await
}

async fn serve(app: Router, listen: &ListenAddr) -> anyhow::Result<()> {
    match listen {
        ListenAddr::Tcp(addr) => {
            let listener = TcpListener::bind(addr).await?;
            tracing::info!("Listening on {}", addr);

            axum::serve(listener, app).await?;
        }
        ListenAddr::Unix(path) => {
            // A stale socket from a previous run blocks bind
            if path.exists() {
                std::fs::remove_file(path)?;
            }
            let listener = UnixListener::bind(path)?;
            tracing::info!("Listening on {}", path.display());

            axum::serve(listener, app).await?;
        }
    }

    Ok(())
}
