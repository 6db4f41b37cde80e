//! # companyhub-service
//!
//! Business logic service layer for CompanyHub. Services translate
//! between DTOs and entities, validate input, and orchestrate the
//! repositories from `companyhub-database`.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references.

pub mod authentication;
pub mod company;
pub mod context;
pub mod dto;
pub mod employee;
pub mod parameters;
pub mod patch;
pub mod shaping;

pub use authentication::AuthenticationService;
pub use company::CompanyService;
pub use context::RequestContext;
pub use employee::EmployeeService;
pub use parameters::{CompanyParameters, EmployeeParameters};
pub use patch::{JsonPatchDocument, PatchError, PatchOperation};
pub use shaping::{DataShaper, Identifiable, ShapedEntity};
