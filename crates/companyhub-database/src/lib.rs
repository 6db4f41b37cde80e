//! # companyhub-database
//!
//! PostgreSQL connection management, repository traits for companies,
//! employees and users, and their PostgreSQL and in-memory
//! implementations.

pub mod connection;
pub mod manager;
pub mod memory;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use manager::RepositoryManager;
pub use memory::MemoryStore;
pub use repositories::{
    CompanyQuery, CompanyRepository, EmployeeQuery, EmployeeRepository, UserRepository,
};
