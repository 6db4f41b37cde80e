//! Company use cases.

pub mod service;

pub use service::CompanyService;
