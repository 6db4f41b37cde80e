//! # companyhub-api
//!
//! HTTP API layer for CompanyHub built on Axum.
//!
//! Provides the REST endpoints, middleware (auth, rate limiting, response
//! caching, versioning, CORS, logging), extractors, output formatters,
//! and HATEOAS links.

pub mod app;
pub mod extractors;
pub mod formatters;
pub mod handlers;
pub mod links;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, build_state, run_server};
pub use state::AppState;
