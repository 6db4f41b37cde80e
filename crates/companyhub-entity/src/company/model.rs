//! Company entity model.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A company owning zero or more employees.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    /// Unique company identifier.
    pub id: Uuid,
    /// Company name (at most 60 characters).
    pub name: String,
    /// Street address (at most 60 characters).
    pub address: String,
    /// Country name.
    pub country: String,
}

impl Company {
    /// Columns a company list may be ordered by.
    pub const SORTABLE_FIELDS: &'static [&'static str] = &["name", "address", "country"];

    /// Create a company with a fresh identifier.
    pub fn new(
        name: impl Into<String>,
        address: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            address: address.into(),
            country: country.into(),
        }
    }

    /// Address and country joined into a single line.
    pub fn full_address(&self) -> String {
        format!("{} {}", self.address, self.country)
    }
}
