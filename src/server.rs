//! HTTP server initialization and runtime setup.
//!
//! Selects the storage backend, wires the services, and runs the Axum server
//! until a shutdown signal arrives.

use crate::config::Config;
use crate::domain::clock::SystemClock;
use crate::domain::storage::Storage;
use crate::infrastructure::storage::{MemoryStorage, RedisStorage};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;

/// Connects the configured storage backend.
///
/// Redis is used when configured; failure to reach it is fatal. Without a
/// Redis configuration the process-local [`MemoryStorage`] is used.
///
/// # Errors
///
/// Returns an error if Redis is configured but unreachable.
pub async fn build_storage(config: &Config) -> Result<Arc<dyn Storage>> {
    match &config.redis_url {
        Some(redis_url) => {
            let redis = RedisStorage::connect(redis_url)
                .await
                .context("Failed to connect to Redis")?;
            tracing::info!("Storage enabled (Redis)");
            Ok(Arc::new(redis))
        }
        None => {
            tracing::warn!("Redis not configured, short links are kept in memory only");
            Ok(Arc::new(MemoryStorage::new()))
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - Storage initialization fails
/// - The listen address is invalid or bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let storage = build_storage(&config).await?;

    let state = AppState::new(storage, Arc::new(SystemClock))
        .with_public_origin(config.public_origin.clone())
        .with_behind_proxy(config.behind_proxy);

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => tracing::error!("Failed to install SIGTERM handler: {}", e),
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
        _ = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_build_storage_without_redis_uses_memory() {
        let config = Config {
            redis_url: None,
            listen_addr: "127.0.0.1:0".to_string(),
            log_level: "info".to_string(),
            log_format: "text".to_string(),
            public_origin: None,
            behind_proxy: false,
        };

        let storage = build_storage(&config).await.unwrap();

        assert_eq!(storage.backend(), "memory");
        assert!(storage.health_check().await);
    }
}
