//! Core type definitions used across the CompanyHub workspace.

pub mod pagination;
pub mod sorting;

pub use pagination::{MetaData, PageRequest, PagedList};
pub use sorting::{SortDirection, SortField};
