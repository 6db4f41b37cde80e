//! Query-string parameters for list endpoints.
//!
//! Keys are camelCase (`pageNumber`, `orderBy`, ...); snake_case spellings
//! are accepted as aliases.

use serde::Deserialize;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_core::types::pagination::DEFAULT_PAGE_SIZE;
use companyhub_core::types::{PageRequest, SortField};
use companyhub_database::{CompanyQuery, EmployeeQuery};
use companyhub_entity::{Company, Employee};

fn default_page_number() -> u32 {
    1
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_max_age() -> u32 {
    u32::MAX
}

/// Paging, sorting and shaping options shared by all list endpoints.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    /// Page number, 1-based.
    #[serde(default = "default_page_number", alias = "page_number")]
    pub page_number: u32,
    /// Page size, capped at 50.
    #[serde(default = "default_page_size", alias = "page_size")]
    pub page_size: u32,
    /// Comma-separated `<property> [asc|desc]` list.
    #[serde(default, alias = "order_by")]
    pub order_by: Option<String>,
    /// Comma-separated property names to return.
    #[serde(default)]
    pub fields: Option<String>,
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            order_by: None,
            fields: None,
        }
    }
}

impl RequestParameters {
    /// The normalized page selection.
    pub fn page(&self) -> PageRequest {
        PageRequest::new(self.page_number, self.page_size)
    }
}

/// Parameters of `GET /api/companies`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyParameters {
    /// Page number, 1-based.
    #[serde(default = "default_page_number", alias = "page_number")]
    pub page_number: u32,
    /// Page size, capped at 50.
    #[serde(default = "default_page_size", alias = "page_size")]
    pub page_size: u32,
    /// Comma-separated `<property> [asc|desc]` list.
    #[serde(default, alias = "order_by")]
    pub order_by: Option<String>,
    /// Comma-separated property names to return.
    #[serde(default)]
    pub fields: Option<String>,
}

impl Default for CompanyParameters {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            order_by: None,
            fields: None,
        }
    }
}

impl CompanyParameters {
    /// Shared paging and shaping options.
    pub fn request(&self) -> RequestParameters {
        RequestParameters {
            page_number: self.page_number,
            page_size: self.page_size,
            order_by: self.order_by.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Repository query for these parameters.
    pub fn to_query(&self) -> CompanyQuery {
        CompanyQuery {
            page: self.request().page(),
            order_by: SortField::parse_order_by(
                self.order_by.as_deref(),
                Company::SORTABLE_FIELDS,
                "name",
            ),
        }
    }
}

/// Parameters of `GET /api/companies/{companyId}/employees`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmployeeParameters {
    /// Page number, 1-based.
    #[serde(default = "default_page_number", alias = "page_number")]
    pub page_number: u32,
    /// Page size, capped at 50.
    #[serde(default = "default_page_size", alias = "page_size")]
    pub page_size: u32,
    /// Comma-separated `<property> [asc|desc]` list.
    #[serde(default, alias = "order_by")]
    pub order_by: Option<String>,
    /// Comma-separated property names to return.
    #[serde(default)]
    pub fields: Option<String>,
    /// Inclusive lower age bound.
    #[serde(default, alias = "min_age")]
    pub min_age: u32,
    /// Inclusive upper age bound.
    #[serde(default = "default_max_age", alias = "max_age")]
    pub max_age: u32,
    /// Case-insensitive substring of the name.
    #[serde(default, alias = "search_term")]
    pub search_term: Option<String>,
}

impl Default for EmployeeParameters {
    fn default() -> Self {
        Self {
            page_number: default_page_number(),
            page_size: default_page_size(),
            order_by: None,
            fields: None,
            min_age: 0,
            max_age: default_max_age(),
            search_term: None,
        }
    }
}

impl EmployeeParameters {
    /// Whether the age bounds describe a non-empty range.
    pub fn valid_age_range(&self) -> bool {
        self.max_age > self.min_age
    }

    /// Shared paging and shaping options.
    pub fn request(&self) -> RequestParameters {
        RequestParameters {
            page_number: self.page_number,
            page_size: self.page_size,
            order_by: self.order_by.clone(),
            fields: self.fields.clone(),
        }
    }

    /// Repository query for these parameters.
    pub fn to_query(&self) -> AppResult<EmployeeQuery> {
        if !self.valid_age_range() {
            return Err(AppError::validation("Max age can't be less than min age"));
        }
        Ok(EmployeeQuery {
            page: self.request().page(),
            min_age: self.min_age,
            max_age: self.max_age,
            search_term: self.search_term.clone(),
            order_by: SortField::parse_order_by(
                self.order_by.as_deref(),
                Employee::SORTABLE_FIELDS,
                "name",
            ),
        })
    }
}
