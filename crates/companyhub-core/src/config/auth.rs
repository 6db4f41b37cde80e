//! Authentication configuration.

use serde::{Deserialize, Serialize};

/// JWT issuance and password policy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Secret key for JWT signing (HMAC-SHA256).
    #[serde(default = "default_jwt_secret")]
    pub jwt_secret: String,
    /// Expected `iss` claim.
    #[serde(default = "default_issuer")]
    pub jwt_issuer: String,
    /// Expected `aud` claim.
    #[serde(default = "default_audience")]
    pub jwt_audience: String,
    /// Token lifetime in minutes.
    #[serde(default = "default_expires")]
    pub jwt_expires_minutes: u64,
    /// Minimum password length.
    #[serde(default = "default_password_min")]
    pub password_min_length: usize,
    /// Whether a password must contain at least one digit.
    #[serde(default = "default_true")]
    pub password_require_digit: bool,
    /// Argon2 memory cost in KiB.
    #[serde(default = "default_argon2_memory")]
    pub argon2_memory_kib: u32,
    /// Argon2 iteration count.
    #[serde(default = "default_argon2_iterations")]
    pub argon2_iterations: u32,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: default_jwt_secret(),
            jwt_issuer: default_issuer(),
            jwt_audience: default_audience(),
            jwt_expires_minutes: default_expires(),
            password_min_length: default_password_min(),
            password_require_digit: default_true(),
            argon2_memory_kib: default_argon2_memory(),
            argon2_iterations: default_argon2_iterations(),
        }
    }
}

fn default_jwt_secret() -> String {
    "CHANGE_ME_IN_PRODUCTION_CHANGE_ME_IN_PRODUCTION".to_string()
}

fn default_issuer() -> String {
    "CompanyHubAPI".to_string()
}

fn default_audience() -> String {
    "https://localhost:5001".to_string()
}

fn default_expires() -> u64 {
    5
}

fn default_password_min() -> usize {
    10
}

fn default_true() -> bool {
    true
}

fn default_argon2_memory() -> u32 {
    19 * 1024
}

fn default_argon2_iterations() -> u32 {
    2
}
