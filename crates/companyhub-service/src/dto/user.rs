//! Registration and login DTOs.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Payload for registering a new user.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForRegistrationDto {
    /// Given name.
    pub first_name: Option<String>,
    /// Family name.
    pub last_name: Option<String>,
    /// Login name.
    #[validate(
        required(message = "Username is required"),
        length(min = 1, message = "Username is required")
    )]
    pub user_name: Option<String>,
    /// Plaintext password; checked against the password policy.
    #[validate(required(message = "Password is required"))]
    pub password: Option<String>,
    /// Email address.
    #[validate(email(message = "Email is not a valid email address."))]
    pub email: Option<String>,
    /// Phone number.
    pub phone_number: Option<String>,
    /// Role names to assign.
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Payload for logging in.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UserForAuthenticationDto {
    /// Login name.
    #[validate(required(message = "User name is required"))]
    pub user_name: Option<String>,
    /// Plaintext password.
    #[validate(required(message = "Password name is required"))]
    pub password: Option<String>,
}

/// Successful login response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenDto {
    /// Signed access token.
    pub token: String,
}
