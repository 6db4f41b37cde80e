//! Core traits defined in `companyhub-core` and implemented by other crates.

pub mod cache;

pub use cache::CacheProvider;
