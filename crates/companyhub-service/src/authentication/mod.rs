//! User registration and token issuance.

pub mod service;

pub use service::AuthenticationService;
