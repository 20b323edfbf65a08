use axum::{
    Json, Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::application::forms::{DELETE_FORM, FEEDBACK_FORM};
use crate::application::use_cases::auth::delete_account::DeleteAccount;
use crate::application::use_cases::feedback::FeedbackInput;
use crate::application::use_cases::feedback::create_feedback::CreateFeedback;
use crate::application::use_cases::users::get_profile::GetProfile;
use crate::bootstrap::app_context::AppContext;
use crate::presentation::http::auth::{self, Bearer, UserResponse};
use crate::presentation::http::errors::{ApiError, internal};
use crate::presentation::http::feedback::FeedbackResponse;
use crate::presentation::http::form::{FormBody, validate_body};

#[derive(Debug, Serialize, ToSchema)]
pub struct UserProfileResponse {
    pub user: UserResponse,
    pub feedback: Vec<FeedbackResponse>,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/users/:username", get(get_user).delete(delete_user))
        .route("/users/:username/feedback", post(add_feedback))
        .with_state(ctx)
}

/// Resolves the session user and requires it to be `username`.
fn require_self(ctx: &AppContext, bearer: Bearer, username: &str) -> Result<String, StatusCode> {
    let current = auth::validate_bearer(&ctx.cfg, bearer)?;
    if current != username {
        tracing::debug!(current = %current, target = %username, "cross_user_access_denied");
        return Err(StatusCode::FORBIDDEN);
    }
    Ok(current)
}

#[utoipa::path(get, path = "/api/users/{username}", tag = "Users",
    params(("username" = String, Path, description = "Username")),
    responses((status = 200, body = UserProfileResponse)))]
pub async fn get_user(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(username): Path<String>,
) -> Result<Json<UserProfileResponse>, StatusCode> {
    let username = require_self(&ctx, bearer, &username)?;
    let users = ctx.user_repo();
    let feedback = ctx.feedback_repo();
    let uc = GetProfile {
        users: users.as_ref(),
        feedback: feedback.as_ref(),
    };
    let profile = uc
        .execute(&username)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok(Json(UserProfileResponse {
        user: profile.user.into(),
        feedback: profile.feedback.into_iter().map(Into::into).collect(),
    }))
}

#[utoipa::path(delete, path = "/api/users/{username}", tag = "Users",
    params(("username" = String, Path, description = "Username")),
    responses((status = 204)))]
pub async fn delete_user(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(username): Path<String>,
    body: Option<FormBody>,
) -> Result<(HeaderMap, StatusCode), ApiError> {
    let username = require_self(&ctx, bearer, &username)?;
    validate_body(&DELETE_FORM, &body.unwrap_or_default()).map_err(ApiError::invalid)?;
    let repo = ctx.user_repo();
    let uc = DeleteAccount {
        user_repo: repo.as_ref(),
    };
    if !uc.execute(&username).await.map_err(internal)? {
        return Err(StatusCode::NOT_FOUND.into());
    }
    Ok((auth::clear_session(&ctx.cfg), StatusCode::NO_CONTENT))
}

#[utoipa::path(post, path = "/api/users/{username}/feedback", tag = "Feedback",
    params(("username" = String, Path, description = "Username")),
    request_body = crate::presentation::http::feedback::FeedbackRequest,
    responses(
        (status = 201, body = FeedbackResponse),
        (status = 422, body = crate::presentation::http::errors::FormErrorResponse)
    ))]
pub async fn add_feedback(
    State(ctx): State<AppContext>,
    bearer: Bearer,
    Path(username): Path<String>,
    body: FormBody,
) -> Result<(StatusCode, Json<FeedbackResponse>), ApiError> {
    let username = require_self(&ctx, bearer, &username)?;
    let form = validate_body(&FEEDBACK_FORM, &body).map_err(ApiError::invalid)?;
    let users = ctx.user_repo();
    let feedback = ctx.feedback_repo();
    let uc = CreateFeedback {
        users: users.as_ref(),
        feedback: feedback.as_ref(),
    };
    let created = uc
        .execute(&username, FeedbackInput::from(form))
        .await
        .map_err(internal)?
        .ok_or(StatusCode::NOT_FOUND)?;
    Ok((StatusCode::CREATED, Json(created.into())))
}
