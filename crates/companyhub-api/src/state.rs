//! Application state shared across all handlers and middleware.

use std::sync::Arc;
use std::time::Instant;

use companyhub_auth::jwt::{JwtDecoder, JwtEncoder};
use companyhub_auth::password::{PasswordHasher, PasswordValidator};
use companyhub_cache::CacheManager;
use companyhub_core::config::AppConfig;
use companyhub_core::result::AppResult;
use companyhub_database::RepositoryManager;
use companyhub_service::{AuthenticationService, CompanyService, EmployeeService};

use crate::middleware::rate_limit::ClientRateLimiter;
use crate::middleware::response_cache::CacheGeneration;

/// Application state containing all shared dependencies.
///
/// Passed to every Axum handler via `State<AppState>`.
/// All fields are `Arc`-wrapped for cheap cloning across tasks.
#[derive(Debug, Clone)]
pub struct AppState {
    // ── Configuration ────────────────────────────────────────
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// When the state was built, for uptime reporting
    pub started_at: Instant,

    // ── Infrastructure ───────────────────────────────────────
    /// Repositories over PostgreSQL or the in-memory store
    pub repositories: RepositoryManager,
    /// Response cache
    pub cache: Arc<CacheManager>,
    /// Advanced on every invalidation so in-flight GETs don't store stale bodies
    pub cache_generation: Arc<CacheGeneration>,
    /// Per-client request limiter, absent when rate limiting is disabled
    pub rate_limiter: Option<Arc<ClientRateLimiter>>,

    // ── Auth ─────────────────────────────────────────────────
    /// JWT token decoder and validator
    pub jwt_decoder: Arc<JwtDecoder>,

    // ── Services ─────────────────────────────────────────────
    /// Company service
    pub company_service: Arc<CompanyService>,
    /// Employee service
    pub employee_service: Arc<EmployeeService>,
    /// Registration and login
    pub auth_service: Arc<AuthenticationService>,
}

impl AppState {
    /// Wire every service over the given repositories.
    pub fn new(config: AppConfig, repositories: RepositoryManager) -> AppResult<Self> {
        let cache = Arc::new(CacheManager::new(&config.cache));
        let rate_limiter = ClientRateLimiter::from_config(&config.rate_limit).map(Arc::new);

        let auth_service = AuthenticationService::new(
            repositories.user.clone(),
            Arc::new(PasswordHasher::new(&config.auth)?),
            Arc::new(PasswordValidator::new(&config.auth)),
            Arc::new(JwtEncoder::new(&config.auth)),
        );

        Ok(Self {
            jwt_decoder: Arc::new(JwtDecoder::new(&config.auth)),
            company_service: Arc::new(CompanyService::new(repositories.company.clone())),
            employee_service: Arc::new(EmployeeService::new(
                repositories.company.clone(),
                repositories.employee.clone(),
            )),
            auth_service: Arc::new(auth_service),
            config: Arc::new(config),
            started_at: Instant::now(),
            repositories,
            cache,
            cache_generation: Arc::new(CacheGeneration::default()),
            rate_limiter,
        })
    }
}
