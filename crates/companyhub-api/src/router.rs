//! Route definitions for the CompanyHub HTTP API.
//!
//! All routes are organized by resource and mounted under `/api`.
//! The router receives `AppState` and passes it to all handlers via Axum's `State` extractor.

use std::time::Duration;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{get, post},
};
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::middleware;
use crate::middleware::cors::build_cors_layer;
use crate::state::AppState;

/// Build the complete Axum router with all routes and middleware.
///
/// Layers run outermost first: logging, tracing, CORS, timeout,
/// compression, rate limiting, version checks, then the response cache.
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .merge(root_routes())
        .merge(authentication_routes())
        .merge(company_routes())
        .merge(company_v2_routes())
        .merge(employee_routes())
        .merge(health_routes());

    let cors = build_cors_layer(&state.config.server.cors);

    Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(state.config.server.max_body_bytes))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::response_cache::response_cache,
        ))
        .layer(axum_middleware::from_fn(
            middleware::versioning::api_versioning,
        ))
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            middleware::rate_limit::rate_limit,
        ))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            state.config.server.request_timeout_seconds,
        )))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum_middleware::from_fn(
            middleware::logging::request_logging,
        ))
        .with_state(state)
}

/// API root document
fn root_routes() -> Router<AppState> {
    Router::new().route("/", get(handlers::root::get_root))
}

/// Registration and login
fn authentication_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/authentication",
            post(handlers::authentication::register_user),
        )
        .route(
            "/authentication/login",
            post(handlers::authentication::authenticate),
        )
}

/// Company CRUD and collections
fn company_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies",
            get(handlers::companies::get_companies)
                .post(handlers::companies::create_company)
                .options(handlers::companies::get_companies_options),
        )
        .route(
            "/companies/collection",
            post(handlers::companies::create_company_collection),
        )
        .route(
            "/companies/collection/{ids}",
            get(handlers::companies::get_company_collection),
        )
        .route(
            "/companies/{companyId}",
            get(handlers::companies::get_company)
                .put(handlers::companies::update_company)
                .patch(handlers::companies::partially_update_company)
                .delete(handlers::companies::delete_company),
        )
}

/// Company list, version 2.0
fn company_v2_routes() -> Router<AppState> {
    Router::new().route("/2.0/companies", get(handlers::companies_v2::get_companies))
}

/// Employees of a company
fn employee_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/companies/{companyId}/employees",
            get(handlers::employees::get_employees_for_company)
                .post(handlers::employees::create_employee_for_company),
        )
        .route(
            "/companies/{companyId}/employees/{id}",
            get(handlers::employees::get_employee_for_company)
                .put(handlers::employees::update_employee_for_company)
                .patch(handlers::employees::partially_update_employee_for_company)
                .delete(handlers::employees::delete_employee_for_company),
        )
}

/// Liveness and backend status
fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/health/detailed", get(handlers::health::health_detailed))
}
