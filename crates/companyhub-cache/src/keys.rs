//! Cache key builders for all CompanyHub cache entries.
//!
//! Every key the application writes is built here.

/// Prefix applied to all CompanyHub cache keys.
const PREFIX: &str = "companyhub";

/// Cache key for a stored HTTP response, identified by a request fingerprint.
pub fn response(fingerprint: &str) -> String {
    format!("{PREFIX}:response:{fingerprint}")
}

/// Pattern matching every stored HTTP response.
pub fn response_pattern() -> String {
    format!("{PREFIX}:response:*")
}
