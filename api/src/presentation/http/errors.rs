use std::collections::BTreeMap;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::forms::FieldErrors;

/// Body of 401/409/422 responses: field name to messages.
#[derive(Debug, Serialize, ToSchema)]
pub struct FormErrorResponse {
    pub errors: BTreeMap<String, Vec<String>>,
}

#[derive(Debug)]
pub enum ApiError {
    Status(StatusCode),
    Form(StatusCode, FieldErrors),
}

impl ApiError {
    pub fn invalid(errors: FieldErrors) -> Self {
        ApiError::Form(StatusCode::UNPROCESSABLE_ENTITY, errors)
    }
}

impl From<StatusCode> for ApiError {
    fn from(status: StatusCode) -> Self {
        ApiError::Status(status)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Status(status) => status.into_response(),
            ApiError::Form(status, errors) => (
                status,
                Json(FormErrorResponse {
                    errors: errors.into_inner(),
                }),
            )
                .into_response(),
        }
    }
}

/// Logs an unexpected failure and hides it behind a bare 500.
pub fn internal(err: anyhow::Error) -> StatusCode {
    tracing::error!(error = ?err, "request_failed");
    StatusCode::INTERNAL_SERVER_ERROR
}
