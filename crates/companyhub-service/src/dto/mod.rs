//! Data transfer objects exchanged with API clients, and their mapping
//! to and from entities.

pub mod company;
pub mod employee;
pub mod user;
pub mod validation;

pub use company::{CompanyDto, CompanyForCreationDto, CompanyForUpdateDto};
pub use employee::{EmployeeDto, EmployeeForCreationDto, EmployeeForUpdateDto};
pub use user::{TokenDto, UserForAuthenticationDto, UserForRegistrationDto};
pub use validation::validate_dto;
