//! `JsonBody` extractor: JSON request bodies with API-shaped rejections.
//!
//! A body that is not valid JSON for the target type is a 400. A literal
//! `null` body is accepted by the extractor and reported by the handler
//! as "<Dto> object is null".

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

use companyhub_core::error::AppError;

/// JSON body that may be `null`.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub Option<T>);

impl<T> JsonBody<T> {
    /// The payload, or a 400 naming the expected object.
    pub fn require(self, name: &str) -> Result<T, AppError> {
        self.0.ok_or_else(|| {
            tracing::error!("{name} object sent from client is null.");
            AppError::validation(format!("{name} object is null"))
        })
    }
}

impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<Option<T>>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(json_rejection(rejection)),
        }
    }
}

fn json_rejection(rejection: JsonRejection) -> AppError {
    tracing::warn!(error = %rejection.body_text(), "Rejected request body");
    AppError::validation(rejection.body_text())
}
