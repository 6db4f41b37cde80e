//! Role checks for route guarding.

use companyhub_core::error::AppError;
use companyhub_entity::Role;

use crate::extractors::AuthUser;

/// Checks that the authenticated user holds at least one of `roles`.
pub fn require_roles(auth: &AuthUser, roles: &[Role]) -> Result<(), AppError> {
    if auth.has_any_role(roles) {
        return Ok(());
    }

    let names = roles.iter().map(Role::as_str).collect::<Vec<_>>().join(" or ");
    tracing::warn!(user = %auth.user_name, required = %names, "Access denied");
    Err(AppError::authorization(format!("{names} role required")))
}

/// Checks that the authenticated user may list companies.
pub fn require_manager(auth: &AuthUser) -> Result<(), AppError> {
    require_roles(auth, &[Role::Manager])
}
