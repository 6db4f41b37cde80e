//! # companyhub-entity
//!
//! Domain entity models for CompanyHub. Every struct in this crate
//! represents a database table row or a domain value object. Database
//! entities additionally derive `sqlx::FromRow`.

pub mod company;
pub mod employee;
pub mod user;

pub use company::Company;
pub use employee::Employee;
pub use user::{Role, User};
