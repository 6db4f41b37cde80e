//! `ApiVersion` extractor: reads `api-version` from the header or query string.

use std::fmt;
use std::str::FromStr;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use companyhub_core::error::AppError;

/// Header and query parameter carrying the requested version.
pub const API_VERSION_HEADER: &str = "api-version";
/// Versions served without deprecation.
pub const SUPPORTED_VERSIONS: &str = "1.0";
/// Versions still served but deprecated.
pub const DEPRECATED_VERSIONS: &str = "2.0";

/// A version of the companies API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ApiVersion {
    /// Company DTOs with a combined address.
    #[default]
    V1,
    /// Full company entities.
    V2,
}

impl ApiVersion {
    /// Canonical `major.minor` form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1.0",
            Self::V2 => "2.0",
        }
    }

    /// The version requested by a request, if any was given.
    pub fn requested(parts: &Parts) -> Option<String> {
        if let Some(value) = parts
            .headers
            .get(API_VERSION_HEADER)
            .and_then(|v| v.to_str().ok())
        {
            return Some(value.trim().to_string());
        }

        parts.uri.query().and_then(|query| {
            query.split('&').find_map(|pair| {
                let (key, value) = pair.split_once('=')?;
                key.eq_ignore_ascii_case(API_VERSION_HEADER)
                    .then(|| value.trim().to_string())
            })
        })
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ApiVersion {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "1.0" => Ok(Self::V1),
            "2" | "2.0" => Ok(Self::V2),
            other => Err(AppError::validation(format!(
                "The HTTP resource that matches the request URI does not support the API version '{other}'."
            ))),
        }
    }
}

impl<S: Send + Sync> FromRequestParts<S> for ApiVersion {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match Self::requested(parts) {
            Some(version) => version.parse(),
            None => Ok(Self::default()),
        }
    }
}
