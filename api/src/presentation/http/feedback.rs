use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    routing::get,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::application::forms::FEEDBACK_FORM;
use crate::application::use_cases::feedback::delete_feedback::DeleteFeedback;
use crate::application::use_cases::feedback::get_feedback::GetFeedback;
use crate::application::use_cases::feedback::update_feedback::UpdateFeedback;
use crate::application::use_cases::feedback::{FeedbackInput, OwnedAccess};
use crate::bootstrap::app_context::AppContext;
use crate::domain::feedback::feedback::Feedback;
use crate::presentation::http::auth::{self, Bearer};
use crate::presentation::http::errors::{ApiError, internal};
use crate::presentation::http::form::{FormBody, validate_body};

#[derive(Debug, Deserialize, ToSchema)]
pub struct FeedbackRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FeedbackResponse {
    pub id: i32,
    pub title: String,
    pub content: String,
    pub username: Option<String>,
}

impl From<Feedback> for FeedbackResponse {
    fn from(f: Feedback) -> Self {
        FeedbackResponse {
            id: f.id,
            title: f.title,
            content: f.content,
            username: f.username,
        }
    }
}

fn granted<T>(access: OwnedAccess<T>) -> Result<T, StatusCode> {
    match access {
        OwnedAccess::Granted(v) => Ok(v),
        OwnedAccess::NotFound => Err(StatusCode::NOT_FOUND),
        OwnedAccess::Forbidden => Err(StatusCode::FORBIDDEN),
    }
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route(
            "/feedback/:id",
            get(get_feedback).put(update_feedback).delete(delete_feedback),
        )
        .with_state(ctx)
}

#[utoipa::path(get, path = "/api/feedback/{id}", tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    responses((status = 200, body = FeedbackResponse)))]
pub async fn get_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<Json<FeedbackResponse>, StatusCode> {
    let username = auth::validate_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.feedback_repo();
    let uc = GetFeedback {
        repo: repo.as_ref(),
    };
    let f = granted(uc.execute(id, &username).await.map_err(internal)?)?;
    Ok(Json(f.into()))
}

#[utoipa::path(put, path = "/api/feedback/{id}", tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    request_body = FeedbackRequest,
    responses(
        (status = 200, body = FeedbackResponse),
        (status = 422, body = crate::presentation::http::errors::FormErrorResponse)
    ))]
pub async fn update_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
    body: FormBody,
) -> Result<Json<FeedbackResponse>, ApiError> {
    let username = auth::validate_bearer(&ctx.cfg, bearer)?;
    let form = validate_body(&FEEDBACK_FORM, &body).map_err(ApiError::invalid)?;
    let repo = ctx.feedback_repo();
    let uc = UpdateFeedback {
        repo: repo.as_ref(),
    };
    let f = granted(
        uc.execute(id, &username, FeedbackInput::from(form))
            .await
            .map_err(internal)?,
    )?;
    Ok(Json(f.into()))
}

#[utoipa::path(delete, path = "/api/feedback/{id}", tag = "Feedback",
    params(("id" = i32, Path, description = "Feedback ID")),
    responses((status = 204)))]
pub async fn delete_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(id): Path<i32>,
) -> Result<StatusCode, StatusCode> {
    let username = auth::validate_bearer(&ctx.cfg, bearer)?;
    let repo = ctx.feedback_repo();
    let uc = DeleteFeedback {
        repo: repo.as_ref(),
    };
    granted(uc.execute(id, &username).await.map_err(internal)?)?;
    Ok(StatusCode::NO_CONTENT)
}
