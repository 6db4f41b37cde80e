//! Password policy enforcement for new passwords.

use companyhub_core::config::AuthConfig;
use companyhub_core::error::AppError;

/// Validates passwords against the configured policy.
#[derive(Debug, Clone)]
pub struct PasswordValidator {
    /// Minimum password length in characters.
    min_length: usize,
    /// Whether at least one digit is required.
    require_digit: bool,
}

impl PasswordValidator {
    /// Creates a new validator from auth configuration.
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            min_length: config.password_min_length,
            require_digit: config.password_require_digit,
        }
    }

    /// List every policy violation of a password.
    pub fn violations(&self, password: &str) -> Vec<String> {
        let mut errors = Vec::new();

        if password.chars().count() < self.min_length {
            errors.push(format!(
                "Passwords must be at least {} characters.",
                self.min_length
            ));
        }

        if self.require_digit && !password.chars().any(|c| c.is_ascii_digit()) {
            errors.push("Passwords must have at least one digit ('0'-'9').".to_string());
        }

        errors
    }

    /// Validates a password against all configured policies.
    ///
    /// Violations are returned as an unprocessable-entity error whose
    /// details map `password` to the list of messages.
    pub fn validate(&self, password: &str) -> Result<(), AppError> {
        let errors = self.violations(password);
        if errors.is_empty() {
            return Ok(());
        }
        Err(AppError::unprocessable("Password does not satisfy the password policy")
            .with_details(serde_json::json!({ "password": errors })))
    }
}
