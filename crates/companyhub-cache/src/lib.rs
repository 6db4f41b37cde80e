//! # companyhub-cache
//!
//! Cache support for CompanyHub: an in-process provider built on
//! [moka](https://crates.io/crates/moka) with per-entry TTLs, the
//! [`CacheManager`] the rest of the application talks to, and the key
//! builders for every cache entry.

pub mod keys;
pub mod memory;
pub mod provider;

pub use memory::MemoryCacheProvider;
pub use provider::CacheManager;
