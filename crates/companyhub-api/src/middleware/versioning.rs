//! API version validation and advertisement.

use axum::extract::Request;
use axum::http::HeaderValue;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::extractors::ApiVersion;
use crate::extractors::version::{DEPRECATED_VERSIONS, SUPPORTED_VERSIONS};

/// Rejects unknown `api-version` values and reports the served versions.
pub async fn api_versioning(request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();
    let requested = ApiVersion::requested(&parts);
    let request = Request::from_parts(parts, body);

    let mut response = match requested.map(|v| v.parse::<ApiVersion>()) {
        Some(Err(err)) => {
            tracing::warn!(error = %err.message, "Unsupported API version requested");
            err.into_response()
        }
        _ => next.run(request).await,
    };

    let headers = response.headers_mut();
    headers.insert(
        "api-supported-versions",
        HeaderValue::from_static(SUPPORTED_VERSIONS),
    );
    headers.insert(
        "api-deprecated-versions",
        HeaderValue::from_static(DEPRECATED_VERSIONS),
    );
    response
}
