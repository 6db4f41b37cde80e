//! Application builder: wires router + middleware + state into an Axum app.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::sync::watch;

use companyhub_core::config::AppConfig;
use companyhub_core::error::AppError;
use companyhub_database::RepositoryManager;

use crate::middleware::rate_limit::ClientRateLimiter;
use crate::router::build_router;
use crate::state::AppState;

/// How often idle rate-limit buckets are pruned.
const RATE_LIMIT_PRUNE_INTERVAL: Duration = Duration::from_secs(60);

/// Builds the complete Axum application with all routes and middleware.
pub fn build_app(state: AppState) -> Router {
    build_router(state)
}

/// Connects the configured repositories and wires the services.
pub async fn build_state(config: AppConfig) -> Result<AppState, AppError> {
    tracing::info!(
        provider = ?config.database.provider,
        "Initializing repositories..."
    );
    let repositories = RepositoryManager::connect(&config.database).await?;
    AppState::new(config, repositories)
}

/// Runs the CompanyHub server with the given configuration.
pub async fn run_server(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting CompanyHub server...");

    // ── Step 1: Repositories, cache and services ─────────────────
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let app_state = build_state(config).await?;
    let repositories = app_state.repositories.clone();

    // ── Step 2: Shutdown channel & background pruning ───────────
    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let prune_handle = app_state
        .rate_limiter
        .clone()
        .map(|limiter| tokio::spawn(prune_rate_limiter(limiter, shutdown_rx)));

    // ── Step 3: Build and start HTTP server ──────────────────────
    let app = build_app(app_state);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| AppError::internal(format!("Failed to bind {}: {}", addr, e)))?;

    tracing::info!("CompanyHub server listening on {}", addr);

    let server = axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(async move {
        shutdown_signal().await;
        let _ = shutdown_tx.send(true);
    });

    server
        .await
        .map_err(|e| AppError::internal(format!("Server error: {}", e)))?;

    // ── Step 4: Drain background work and close the pool ────────
    if let Some(handle) = prune_handle {
        let _ = handle.await;
    }
    repositories.close().await;
    tracing::info!("CompanyHub server stopped");

    Ok(())
}

async fn prune_rate_limiter(limiter: Arc<ClientRateLimiter>, mut shutdown: watch::Receiver<bool>) {
    let mut ticker = tokio::time::interval(RATE_LIMIT_PRUNE_INTERVAL);
    loop {
        tokio::select! {
            _ = ticker.tick() => limiter.retain_recent(),
            _ = shutdown.changed() => break,
        }
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM)
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received, starting graceful shutdown...");
}
