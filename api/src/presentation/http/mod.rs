use axum::Router;

use crate::bootstrap::app_context::AppContext;

pub mod auth;
pub mod errors;
pub mod feedback;
pub mod form;
pub mod health;
pub mod users;

/// All JSON routes under `/api`, without transport layers.
pub fn api_router(ctx: AppContext) -> Router {
    Router::new()
        .nest("/api", health::routes(ctx.clone()))
        .nest("/api/auth", auth::routes(ctx.clone()))
        .nest("/api", users::routes(ctx.clone()))
        .nest("/api", feedback::routes(ctx))
}
