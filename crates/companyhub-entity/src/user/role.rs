//! Role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Roles a user can be assigned.
///
/// Stored by name in the `roles` table and carried in the `roles` claim
/// of issued tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Manages companies and their staff.
    Manager,
    /// Full administrative access.
    Administrator,
}

impl Role {
    /// Every known role, in seeding order.
    pub const ALL: [Role; 2] = [Role::Manager, Role::Administrator];

    /// Return the role name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Manager => "Manager",
            Self::Administrator => "Administrator",
        }
    }

    /// Check if this role is the administrator role.
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Administrator)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = companyhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "manager" => Ok(Self::Manager),
            "administrator" => Ok(Self::Administrator),
            _ => Err(companyhub_core::AppError::validation(format!(
                "Invalid role: '{s}'. Expected one of: Manager, Administrator"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_str() {
        assert_eq!("Manager".parse::<Role>().unwrap(), Role::Manager);
        assert_eq!("ADMINISTRATOR".parse::<Role>().unwrap(), Role::Administrator);
        assert!("viewer".parse::<Role>().is_err());
    }

    #[test]
    fn test_display_matches_stored_name() {
        assert_eq!(Role::Administrator.to_string(), "Administrator");
        assert!(Role::Administrator.is_admin());
        assert!(!Role::Manager.is_admin());
    }
}
