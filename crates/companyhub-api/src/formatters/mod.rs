//! Response body formatters selected by content negotiation.

pub mod csv;

use axum::http::header::CONTENT_TYPE;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use companyhub_core::error::AppError;
use companyhub_core::result::AppResult;
use companyhub_core::types::MetaData;

use crate::extractors::{AcceptMediaType, OutputFormat};

pub use self::csv::{CsvRecord, to_csv};

/// Header carrying paging metadata.
pub const PAGINATION_HEADER: &str = "x-pagination";

/// Render a body in the negotiated format.
///
/// `json` is used for JSON media types; `records` for CSV.
pub fn render<J, R>(
    status: StatusCode,
    media: &AcceptMediaType,
    json: &J,
    records: &[R],
) -> AppResult<Response>
where
    J: Serialize + ?Sized,
    R: CsvRecord,
{
    let body = match media.format {
        OutputFormat::Csv => to_csv(records),
        OutputFormat::Json => serde_json::to_string(json)?,
    };

    let content_type = HeaderValue::from_str(&media.content_type())
        .map_err(|e| AppError::internal(format!("Invalid content type: {e}")))?;
    Ok((status, [(CONTENT_TYPE, content_type)], body).into_response())
}

/// Add the `X-Pagination` header.
pub fn with_pagination(mut response: Response, meta: &MetaData) -> AppResult<Response> {
    let value = HeaderValue::from_str(&serde_json::to_string(meta)?)
        .map_err(|e| AppError::internal(format!("Invalid pagination header: {e}")))?;
    response.headers_mut().insert(PAGINATION_HEADER, value);
    Ok(response)
}
