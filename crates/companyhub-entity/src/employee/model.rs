//! Employee entity model.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An employee of exactly one company.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    /// Unique employee identifier.
    pub id: Uuid,
    /// Employee name (at most 30 characters).
    pub name: String,
    /// Age in years (at least 18).
    pub age: i32,
    /// Job title (at most 20 characters).
    pub position: String,
    /// Owning company.
    pub company_id: Uuid,
}

impl Employee {
    /// Columns an employee list may be ordered by.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["name", "age", "position"];

    /// Create an employee with a fresh identifier for the given company.
    pub fn new(company_id: Uuid, name: impl Into<String>, age: i32, position: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            age,
            position: position.into(),
            company_id,
        }
    }

    /// Compare two employees on one of [`Self::SORTABLE_FIELDS`].
    ///
    /// Unknown field names compare equal.
    pub fn compare_by(&self, other: &Self, field: &str) -> Ordering {
        match field {
            "name" => self.name.to_lowercase().cmp(&other.name.to_lowercase()),
            "age" => self.age.cmp(&other.age),
            "position" => self
                .position
                .to_lowercase()
                .cmp(&other.position.to_lowercase()),
            _ => Ordering::Equal,
        }
    }
}
