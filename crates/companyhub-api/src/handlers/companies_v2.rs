//! Version 2.0 of the company list: full entities instead of DTOs.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;

use companyhub_core::error::AppError;
use companyhub_service::CompanyParameters;

use crate::extractors::{AcceptMediaType, AuthUser, QueryParams};
use crate::formatters::{render, with_pagination};
use crate::state::AppState;

/// GET /api/2.0/companies
pub async fn get_companies(
    State(state): State<AppState>,
    _auth: AuthUser,
    media: AcceptMediaType,
    QueryParams(params): QueryParams<CompanyParameters>,
) -> Result<Response, AppError> {
    list(&state, &media, &params).await
}

/// One page of full companies in the negotiated format.
pub async fn list(
    state: &AppState,
    media: &AcceptMediaType,
    params: &CompanyParameters,
) -> Result<Response, AppError> {
    let page = state.company_service.get_companies_full(params).await?;
    let response = render(StatusCode::OK, media, &page.items, &page.items)?;
    with_pagination(response, &page.meta_data)
}
