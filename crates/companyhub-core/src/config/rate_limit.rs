//! Rate limiting configuration.

use serde::{Deserialize, Serialize};

/// Per-client request rate limit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Whether rate limiting is applied.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Requests allowed per period.
    #[serde(default = "default_requests")]
    pub requests: u32,
    /// Length of the period in seconds.
    #[serde(default = "default_period")]
    pub period_seconds: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            requests: default_requests(),
            period_seconds: default_period(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_requests() -> u32 {
    30
}

fn default_period() -> u64 {
    60
}
