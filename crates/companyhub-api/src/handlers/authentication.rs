//! Authentication handlers: registration and login.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;

use companyhub_core::error::AppError;
use companyhub_service::dto::{TokenDto, UserForAuthenticationDto, UserForRegistrationDto};

use crate::extractors::JsonBody;
use crate::state::AppState;

/// POST /api/authentication
pub async fn register_user(
    State(state): State<AppState>,
    body: JsonBody<UserForRegistrationDto>,
) -> Result<StatusCode, AppError> {
    let dto = body.require("UserForRegistrationDto")?;
    state.auth_service.register_user(dto).await?;
    Ok(StatusCode::CREATED)
}

/// POST /api/authentication/login
pub async fn authenticate(
    State(state): State<AppState>,
    body: JsonBody<UserForAuthenticationDto>,
) -> Result<Json<TokenDto>, AppError> {
    let dto = body.require("UserForAuthenticationDto")?;
    let token = state.auth_service.login(dto).await?;
    Ok(Json(token))
}
