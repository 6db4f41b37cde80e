//! API root document.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use companyhub_core::error::AppError;
use companyhub_service::dto::CompanyDto;

use crate::extractors::AcceptMediaType;
use crate::formatters::render;
use crate::links::{BaseUrl, root_links};

/// GET /api
///
/// Returns the entry links for the apiroot media type, 204 otherwise.
pub async fn get_root(media: AcceptMediaType, base: BaseUrl) -> Result<Response, AppError> {
    if !media.wants_api_root() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }

    let no_records: &[CompanyDto] = &[];
    render(StatusCode::OK, &media, &root_links(&base), no_records)
}
