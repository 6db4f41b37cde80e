//! Cache configuration.

use serde::{Deserialize, Serialize};

/// In-process cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Whether GET responses are cached.
    #[serde(default = "default_true")]
    pub response_cache_enabled: bool,
    /// Lifetime of a cached response in seconds (also the `max-age`).
    #[serde(default = "default_response_ttl")]
    pub response_ttl_seconds: u64,
    /// Maximum number of entries in the cache.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
    /// Responses with larger bodies are never cached.
    #[serde(default = "default_max_body")]
    pub max_cached_body_bytes: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            response_cache_enabled: default_true(),
            response_ttl_seconds: default_response_ttl(),
            max_capacity: default_max_capacity(),
            max_cached_body_bytes: default_max_body(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_response_ttl() -> u64 {
    60
}

fn default_max_capacity() -> u64 {
    10000
}

fn default_max_body() -> usize {
    256 * 1024
}
