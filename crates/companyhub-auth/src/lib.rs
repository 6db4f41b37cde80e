//! # companyhub-auth
//!
//! Authentication primitives for CompanyHub.
//!
//! ## Modules
//!
//! - `jwt`: signed access token creation and validation
//! - `password`: Argon2id password hashing and password policy

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::{PasswordHasher, PasswordValidator};
