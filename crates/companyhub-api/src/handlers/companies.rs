//! Company handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::{ALLOW, LOCATION};
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use companyhub_core::error::AppError;
use companyhub_service::dto::{CompanyForCreationDto, CompanyForUpdateDto};
use companyhub_service::{CompanyParameters, JsonPatchDocument};

use crate::extractors::path::{format_id_list, parse_id_list, parse_uuid};
use crate::extractors::{AcceptMediaType, ApiVersion, AuthUser, JsonBody, QueryParams};
use crate::formatters::{render, with_pagination};
use crate::handlers::companies_v2;
use crate::middleware::rbac::require_manager;
use crate::state::AppState;

fn created_at(location: &str, body: Response) -> Result<Response, AppError> {
    let location = HeaderValue::from_str(location)
        .map_err(|e| AppError::internal(format!("Invalid location: {e}")))?;
    let mut response = body;
    *response.status_mut() = StatusCode::CREATED;
    response.headers_mut().insert(LOCATION, location);
    Ok(response)
}

/// GET /api/companies
///
/// Serves the 2.0 list when that version is requested.
pub async fn get_companies(
    State(state): State<AppState>,
    auth: AuthUser,
    version: ApiVersion,
    media: AcceptMediaType,
    QueryParams(params): QueryParams<CompanyParameters>,
) -> Result<Response, AppError> {
    if version == ApiVersion::V2 {
        return companies_v2::list(&state, &media, &params).await;
    }
    require_manager(&auth)?;

    let page = state.company_service.get_companies(&params).await?;
    let response = render(StatusCode::OK, &media, &page.items, &page.items)?;
    with_pagination(response, &page.meta_data)
}

/// OPTIONS /api/companies
pub async fn get_companies_options() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(ALLOW, HeaderValue::from_static("GET, OPTIONS, POST"))],
    )
}

/// GET /api/companies/{companyId}
pub async fn get_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    media: AcceptMediaType,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id = parse_uuid(&id)?;
    let company = state.company_service.get_company(id).await?;
    render(StatusCode::OK, &media, &company, std::slice::from_ref(&company))
}

/// GET /api/companies/collection/{ids}
pub async fn get_company_collection(
    State(state): State<AppState>,
    _auth: AuthUser,
    media: AcceptMediaType,
    Path(ids): Path<String>,
) -> Result<Response, AppError> {
    let ids = parse_id_list(&ids)?;
    let companies = state.company_service.get_companies_by_ids(&ids).await?;
    render(StatusCode::OK, &media, &companies, &companies)
}

/// POST /api/companies
pub async fn create_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    body: JsonBody<CompanyForCreationDto>,
) -> Result<Response, AppError> {
    let dto = body.require("CompanyForCreationDto")?;
    let company = state.company_service.create_company(dto).await?;

    let location = format!("/api/companies/{}", company.id);
    created_at(&location, Json(company).into_response())
}

/// POST /api/companies/collection
pub async fn create_company_collection(
    State(state): State<AppState>,
    _auth: AuthUser,
    body: JsonBody<Vec<CompanyForCreationDto>>,
) -> Result<Response, AppError> {
    let Some(dtos) = body.0 else {
        tracing::error!("Company collection sent from client is null.");
        return Err(AppError::validation("Company collection is null"));
    };

    let (companies, ids) = state.company_service.create_company_collection(dtos).await?;

    let location = format!("/api/companies/collection/{}", format_id_list(&ids));
    created_at(&location, Json(companies).into_response())
}

/// PUT /api/companies/{companyId}
pub async fn update_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    body: JsonBody<CompanyForUpdateDto>,
) -> Result<StatusCode, AppError> {
    let id = parse_uuid(&id)?;
    let dto = body.require("CompanyForUpdateDto")?;
    state.company_service.update_company(id, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/companies/{companyId}
pub async fn partially_update_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
    body: JsonBody<JsonPatchDocument>,
) -> Result<StatusCode, AppError> {
    let id = parse_uuid(&id)?;
    let patch = body.require("patchDoc")?;
    state
        .company_service
        .partially_update_company(id, &patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/companies/{companyId}
pub async fn delete_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = parse_uuid(&id)?;
    state.company_service.delete_company(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
