//! HATEOAS link generation.

use axum::extract::FromRequestParts;
use axum::http::HeaderMap;
use axum::http::header::HOST;
use axum::http::request::Parts;
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_service::dto::EmployeeDto;
use companyhub_service::{DataShaper, ShapedEntity};

use crate::extractors::AcceptMediaType;

/// Characters escaped in a query value; field lists keep their commas.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b',')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// A hypermedia link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Absolute target URL.
    pub href: String,
    /// Relation name.
    pub rel: String,
    /// HTTP method to use.
    pub method: String,
}

impl Link {
    /// Create a link.
    pub fn new(href: impl Into<String>, rel: impl Into<String>, method: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            method: method.into(),
        }
    }
}

/// A collection wrapped together with its own links.
#[derive(Debug, Clone, Serialize)]
pub struct LinkCollectionWrapper<T> {
    /// The items.
    pub value: Vec<T>,
    /// Links for the collection.
    pub links: Vec<Link>,
}

/// Scheme and authority the client used to reach the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseUrl(pub String);

impl BaseUrl {
    /// Derive from `X-Forwarded-Proto`/`X-Forwarded-Host`, then `Host`.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let scheme = header("x-forwarded-proto").unwrap_or("http");
        let host = header("x-forwarded-host")
            .or_else(|| header(HOST.as_str()))
            .unwrap_or("localhost");
        Self(format!("{scheme}://{host}"))
    }

    /// Absolute URL for a path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.0)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for BaseUrl {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_headers(&parts.headers))
    }
}

/// Body of an employee list response.
#[derive(Debug, Clone)]
pub enum LinkResponse {
    /// Shaped employees without links.
    Shaped(Vec<ShapedEntity>),
    /// Shaped employees with links, wrapped with collection links.
    Linked(LinkCollectionWrapper<ShapedEntity>),
}

impl LinkResponse {
    /// Whether links were generated.
    pub fn has_links(&self) -> bool {
        matches!(self, Self::Linked(_))
    }

    /// The JSON body.
    pub fn into_value(self) -> AppResult<Value> {
        let value = match self {
            Self::Shaped(entities) => serde_json::to_value(entities)?,
            Self::Linked(wrapper) => serde_json::to_value(wrapper)?,
        };
        Ok(value)
    }
}

/// Builds links for employee resources.
#[derive(Debug, Clone)]
pub struct EmployeeLinks {
    base: BaseUrl,
    shaper: DataShaper<EmployeeDto>,
}

impl EmployeeLinks {
    /// Links rooted at `base`.
    pub fn new(base: BaseUrl) -> Self {
        Self {
            base,
            shaper: DataShaper::new(),
        }
    }

    /// Shape the employees and add links when the media type asks for them.
    pub fn try_generate_links(
        &self,
        employees: &[EmployeeDto],
        fields: Option<&str>,
        company_id: Uuid,
        media: &AcceptMediaType,
    ) -> AppResult<LinkResponse> {
        let shaped = self.shaper.shape_data(employees, fields)?;

        if !media.wants_links() {
            return Ok(LinkResponse::Shaped(shaped));
        }

        let fields = fields.map(str::trim).unwrap_or_default();
        let value = shaped
            .into_iter()
            .map(|mut entity| -> AppResult<ShapedEntity> {
                let links = self.employee_links(company_id, entity.id, fields);
                entity.insert("links", serde_json::to_value(links)?);
                Ok(entity)
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(LinkResponse::Linked(LinkCollectionWrapper {
            value,
            links: vec![Link::new(
                self.base.url(&format!("/api/companies/{company_id}/employees")),
                "self",
                "GET",
            )],
        }))
    }

    fn employee_links(&self, company_id: Uuid, id: Uuid, fields: &str) -> Vec<Link> {
        let resource = self
            .base
            .url(&format!("/api/companies/{company_id}/employees/{id}"));
        let self_href = if fields.is_empty() {
            resource.clone()
        } else {
            format!("{resource}?fields={}", utf8_percent_encode(fields, QUERY_VALUE))
        };
        vec![
            Link::new(self_href, "self", "GET"),
            Link::new(resource.clone(), "delete_employee", "DELETE"),
            Link::new(resource.clone(), "update_employee", "PUT"),
            Link::new(resource, "partially_update_employee", "PATCH"),
        ]
    }
}

/// Links of the API root document.
pub fn root_links(base: &BaseUrl) -> Vec<Link> {
    vec![
        Link::new(base.url("/api"), "self", "GET"),
        Link::new(base.url("/api/companies"), "companies", "GET"),
        Link::new(base.url("/api/companies"), "create_company", "POST"),
    ]
}
