//! Health check handlers.

use axum::Json;
use axum::extract::State;
use serde::Serialize;

use companyhub_core::traits::cache::CacheProvider;

use crate::state::AppState;

/// Basic liveness report.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Overall status.
    pub status: String,
    /// Crate version.
    pub version: String,
}

/// Liveness plus backend status.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedHealthResponse {
    /// `ok` when every backend is reachable, `degraded` otherwise.
    pub status: String,
    /// Crate version.
    pub version: String,
    /// Seconds since the server state was built.
    pub uptime_seconds: u64,
    /// Repository backend name.
    pub database_provider: String,
    /// `connected` or `unavailable`.
    pub database: String,
    /// `connected` or `unavailable`.
    pub cache: String,
}

fn reachability(ok: bool) -> String {
    if ok { "connected" } else { "unavailable" }.to_string()
}

/// GET /api/health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// GET /api/health/detailed
pub async fn health_detailed(State(state): State<AppState>) -> Json<DetailedHealthResponse> {
    let database = state.repositories.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Database health check failed");
        false
    });
    let cache = state.cache.health_check().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Cache health check failed");
        false
    });

    Json(DetailedHealthResponse {
        status: if database && cache { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database_provider: state.repositories.provider().to_string(),
        database: reachability(database),
        cache: reachability(cache),
    })
}
