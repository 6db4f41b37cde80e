//! Request context carrying the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use companyhub_entity::Role;

/// Context for the current authenticated request.
///
/// Built from validated token claims so that every operation knows
/// *who* is acting and with which roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestContext {
    /// The authenticated user's ID.
    pub user_id: Uuid,
    /// The login name from the token.
    pub user_name: String,
    /// Roles granted when the token was issued.
    pub roles: Vec<Role>,
    /// When the request was received.
    pub request_time: DateTime<Utc>,
}

impl RequestContext {
    /// Creates a new request context.
    pub fn new(user_id: Uuid, user_name: String, roles: Vec<Role>) -> Self {
        Self {
            user_id,
            user_name,
            roles,
            request_time: Utc::now(),
        }
    }

    /// Returns whether the user holds the given role.
    pub fn has_role(&self, role: Role) -> bool {
        self.roles.contains(&role)
    }

    /// Returns whether the user holds any of the given roles.
    pub fn has_any_role(&self, roles: &[Role]) -> bool {
        roles.iter().any(|r| self.has_role(*r))
    }

    /// Returns whether the current user is an administrator.
    pub fn is_admin(&self) -> bool {
        self.roles.iter().any(Role::is_admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_checks() {
        let ctx = RequestContext::new(Uuid::new_v4(), "jdoe".to_string(), vec![Role::Manager]);
        assert!(ctx.has_role(Role::Manager));
        assert!(ctx.has_any_role(&[Role::Administrator, Role::Manager]));
        assert!(!ctx.is_admin());
    }
}
