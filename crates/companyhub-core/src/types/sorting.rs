//! Sorting types for list endpoints.

use serde::{Deserialize, Serialize};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

impl SortDirection {
    /// Return the SQL keyword for this direction.
    pub fn as_sql(&self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A sort specification consisting of a field name and direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// Canonical field name, taken from the allowed list.
    pub field: String,
    /// Sort direction.
    #[serde(default)]
    pub direction: SortDirection,
}

impl SortField {
    /// Create a new sort field.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Create an ascending sort on the given field.
    pub fn asc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Asc)
    }

    /// Create a descending sort on the given field.
    pub fn desc(field: impl Into<String>) -> Self {
        Self::new(field, SortDirection::Desc)
    }

    /// Parse an `orderBy` query value such as `"name desc, age"`.
    ///
    /// Field names are matched case-insensitively against `allowed` and
    /// normalized to the allowed spelling. Unknown names are skipped. When
    /// nothing usable remains the result is an ascending sort on
    /// `default_field`.
    pub fn parse_order_by(
        order_by: Option<&str>,
        allowed: &[&str],
        default_field: &str,
    ) -> Vec<SortField> {
        let mut fields: Vec<SortField> = Vec::new();

        for clause in order_by.unwrap_or_default().split(',') {
            let mut parts = clause.split_whitespace();
            let Some(name) = parts.next() else {
                continue;
            };
            let Some(field) = allowed.iter().find(|a| a.eq_ignore_ascii_case(name)) else {
                continue;
            };
            let direction = match parts.next() {
                Some(dir) if dir.eq_ignore_ascii_case("desc") => SortDirection::Desc,
                _ => SortDirection::Asc,
            };
            if fields.iter().any(|f| f.field == *field) {
                continue;
            }
            fields.push(SortField::new(*field, direction));
        }

        if fields.is_empty() {
            fields.push(SortField::asc(default_field));
        }
        fields
    }

    /// Render a list of sort fields as a SQL `ORDER BY` body.
    ///
    /// Field names must already be whitelisted column names.
    pub fn to_sql(fields: &[SortField]) -> String {
        fields
            .iter()
            .map(|f| format!("{} {}", f.field, f.direction.as_sql()))
            .collect::<Vec<_>>()
            .join(", ")
    }
}
