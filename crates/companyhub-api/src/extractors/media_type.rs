//! `AcceptMediaType` extractor: output negotiation from the `Accept` header.

use axum::extract::FromRequestParts;
use axum::http::header::ACCEPT;
use axum::http::request::Parts;

use companyhub_core::error::AppError;

/// Media type that asks for HATEOAS links in the response.
pub const HATEOAS_MEDIA_TYPE: &str = "application/vnd.companyhub.hateoas+json";
/// Media type that asks for the API root document.
pub const API_ROOT_MEDIA_TYPE: &str = "application/vnd.companyhub.apiroot+json";
/// Plain JSON.
pub const JSON_MEDIA_TYPE: &str = "application/json";
/// Comma-separated values.
pub const CSV_MEDIA_TYPE: &str = "text/csv";

/// Serializer selected for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON body, including vendor `+json` types.
    Json,
    /// CSV body.
    Csv,
}

/// The negotiated response media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptMediaType {
    /// Media type essence, lowercased, without parameters.
    pub media_type: String,
    /// Serializer to use.
    pub format: OutputFormat,
}

impl Default for AcceptMediaType {
    fn default() -> Self {
        Self {
            media_type: JSON_MEDIA_TYPE.to_string(),
            format: OutputFormat::Json,
        }
    }
}

impl AcceptMediaType {
    /// Pick the first supported media type from an `Accept` header value.
    ///
    /// Entries are tried by descending quality; a missing or empty header
    /// means JSON.
    pub fn negotiate(accept: Option<&str>) -> Result<Self, AppError> {
        let Some(accept) = accept.map(str::trim).filter(|a| !a.is_empty()) else {
            return Ok(Self::default());
        };

        let mut candidates: Vec<(String, f32)> = accept
            .split(',')
            .filter_map(|entry| {
                let mut pieces = entry.split(';').map(str::trim);
                let essence = pieces.next()?.to_ascii_lowercase();
                let quality = pieces
                    .filter_map(|p| p.strip_prefix("q="))
                    .find_map(|q| q.parse::<f32>().ok())
                    .unwrap_or(1.0);
                (!essence.is_empty() && quality > 0.0).then_some((essence, quality))
            })
            .collect();
        candidates.sort_by(|a, b| b.1.total_cmp(&a.1));

        candidates
            .into_iter()
            .find_map(|(essence, _)| Self::supported(&essence))
            .ok_or_else(|| {
                tracing::warn!(accept = %accept, "No acceptable media type");
                AppError::not_acceptable(format!("The requested media type is not supported: {accept}"))
            })
    }

    fn supported(essence: &str) -> Option<Self> {
        let format = match essence {
            "*/*" | "application/*" | JSON_MEDIA_TYPE | "text/json" => {
                return Some(Self::default());
            }
            CSV_MEDIA_TYPE => OutputFormat::Csv,
            HATEOAS_MEDIA_TYPE | API_ROOT_MEDIA_TYPE => OutputFormat::Json,
            _ => return None,
        };
        Some(Self {
            media_type: essence.to_string(),
            format,
        })
    }

    /// Subtype without a `+json` suffix, e.g. `vnd.companyhub.hateoas`.
    fn subtype(&self) -> &str {
        let subtype = self.media_type.split('/').nth(1).unwrap_or_default();
        subtype.strip_suffix("+json").unwrap_or(subtype)
    }

    /// Whether the client asked for HATEOAS links.
    pub fn wants_links(&self) -> bool {
        self.subtype().ends_with("hateoas")
    }

    /// Whether the client asked for the API root document.
    pub fn wants_api_root(&self) -> bool {
        self.subtype().ends_with("apiroot")
    }

    /// `Content-Type` header value for the response.
    pub fn content_type(&self) -> String {
        match self.format {
            OutputFormat::Csv => format!("{CSV_MEDIA_TYPE}; charset=utf-8"),
            OutputFormat::Json => format!("{}; charset=utf-8", self.media_type),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for AcceptMediaType {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accept = parts.headers.get(ACCEPT).and_then(|v| v.to_str().ok());
        Self::negotiate(accept)
    }
}
