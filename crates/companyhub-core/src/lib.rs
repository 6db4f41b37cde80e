//! # companyhub-core
//!
//! Core crate for CompanyHub. Contains configuration schemas, paging and
//! sorting types, the cache provider trait, and the unified error system.
//! The `axum` feature adds the HTTP rendering of errors.
//!
//! This crate has **no** internal dependencies on other CompanyHub crates.

pub mod config;
pub mod error;
#[cfg(feature = "axum")]
pub mod response;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
