//! Employee handlers, nested under a company.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};

use companyhub_core::error::AppError;
use companyhub_service::dto::{EmployeeDto, EmployeeForCreationDto, EmployeeForUpdateDto};
use companyhub_service::parameters::RequestParameters;
use companyhub_service::{DataShaper, EmployeeParameters, JsonPatchDocument};

use crate::extractors::path::parse_uuid;
use crate::extractors::{AcceptMediaType, AuthUser, JsonBody, OutputFormat, QueryParams};
use crate::formatters::{render, with_pagination};
use crate::links::{BaseUrl, EmployeeLinks};
use crate::state::AppState;

fn ids(company_id: &str, id: &str) -> Result<(uuid::Uuid, uuid::Uuid), AppError> {
    Ok((parse_uuid(company_id)?, parse_uuid(id)?))
}

/// GET /api/companies/{companyId}/employees
pub async fn get_employees_for_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    media: AcceptMediaType,
    base: BaseUrl,
    Path(company_id): Path<String>,
    QueryParams(params): QueryParams<EmployeeParameters>,
) -> Result<Response, AppError> {
    let company_id = parse_uuid(&company_id)?;
    let page = state
        .employee_service
        .get_employees(company_id, &params)
        .await?;

    let response = match media.format {
        OutputFormat::Csv => render(StatusCode::OK, &media, &page.items, &page.items)?,
        OutputFormat::Json => {
            let body = EmployeeLinks::new(base)
                .try_generate_links(&page.items, params.fields.as_deref(), company_id, &media)?
                .into_value()?;
            render(StatusCode::OK, &media, &body, &page.items)?
        }
    };
    with_pagination(response, &page.meta_data)
}

/// GET /api/companies/{companyId}/employees/{id}
pub async fn get_employee_for_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    media: AcceptMediaType,
    Path((company_id, id)): Path<(String, String)>,
    QueryParams(params): QueryParams<RequestParameters>,
) -> Result<Response, AppError> {
    let (company_id, id) = ids(&company_id, &id)?;
    let employee = state.employee_service.get_employee(company_id, id).await?;

    let shaped = DataShaper::<EmployeeDto>::new().shape_entity(&employee, params.fields.as_deref())?;
    render(
        StatusCode::OK,
        &media,
        &shaped,
        std::slice::from_ref(&employee),
    )
}

/// POST /api/companies/{companyId}/employees
pub async fn create_employee_for_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(company_id): Path<String>,
    body: JsonBody<EmployeeForCreationDto>,
) -> Result<Response, AppError> {
    let company_id = parse_uuid(&company_id)?;
    let dto = body.require("EmployeeForCreationDto")?;
    let employee = state
        .employee_service
        .create_employee_for_company(company_id, dto)
        .await?;

    let location = HeaderValue::from_str(&format!(
        "/api/companies/{company_id}/employees/{}",
        employee.id
    ))
    .map_err(|e| AppError::internal(format!("Invalid location: {e}")))?;

    Ok((StatusCode::CREATED, [(LOCATION, location)], Json(employee)).into_response())
}

/// PUT /api/companies/{companyId}/employees/{id}
pub async fn update_employee_for_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((company_id, id)): Path<(String, String)>,
    body: JsonBody<EmployeeForUpdateDto>,
) -> Result<StatusCode, AppError> {
    let (company_id, id) = ids(&company_id, &id)?;
    let dto = body.require("EmployeeForUpdateDto")?;
    state
        .employee_service
        .update_employee_for_company(company_id, id, dto)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// PATCH /api/companies/{companyId}/employees/{id}
pub async fn partially_update_employee_for_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((company_id, id)): Path<(String, String)>,
    body: JsonBody<JsonPatchDocument>,
) -> Result<StatusCode, AppError> {
    let (company_id, id) = ids(&company_id, &id)?;
    let patch = body.require("patchDoc")?;
    state
        .employee_service
        .partially_update_employee_for_company(company_id, id, &patch)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/companies/{companyId}/employees/{id}
pub async fn delete_employee_for_company(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path((company_id, id)): Path<(String, String)>,
) -> Result<StatusCode, AppError> {
    let (company_id, id) = ids(&company_id, &id)?;
    state
        .employee_service
        .delete_employee_for_company(company_id, id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
