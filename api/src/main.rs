use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::MatchedPath;
use dotenvy::dotenv;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use api::application::ports::password_hasher::PasswordHashPort;
use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::config::{Config, StoreBackend};
use api::infrastructure::crypto::Argon2PasswordHasher;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
        paths(
            api::presentation::http::auth::register,
            api::presentation::http::auth::login,
            api::presentation::http::auth::logout,
            api::presentation::http::auth::me,
            api::presentation::http::users::get_user,
            api::presentation::http::users::delete_user,
            api::presentation::http::users::add_feedback,
            api::presentation::http::feedback::get_feedback,
            api::presentation::http::feedback::update_feedback,
            api::presentation::http::feedback::delete_feedback,
            api::presentation::http::health::health,
        ),
        components(schemas(
            api::presentation::http::auth::RegisterRequest,
            api::presentation::http::auth::LoginRequest,
            api::presentation::http::auth::LoginResponse,
            api::presentation::http::auth::UserResponse,
            api::presentation::http::users::UserProfileResponse,
            api::presentation::http::feedback::FeedbackRequest,
            api::presentation::http::feedback::FeedbackResponse,
            api::presentation::http::errors::FormErrorResponse,
            api::presentation::http::health::HealthResp,
        )),
        tags(
            (name = "Auth", description = "Registration and sessions"),
            (name = "Users", description = "Account profile and deletion"),
            (name = "Feedback", description = "Feedback notes"),
            (name = "Health", description = "System health checks")
        )
    )]
struct ApiDoc;

fn cors_layer(cfg: &Config) -> CorsLayer {
    let methods = [
        http::Method::GET,
        http::Method::POST,
        http::Method::PUT,
        http::Method::DELETE,
        http::Method::OPTIONS,
    ];
    let headers = [http::header::CONTENT_TYPE, http::header::AUTHORIZATION];
    match cfg.frontend_url.as_deref().map(HeaderValue::from_str) {
        Some(Ok(origin)) => CorsLayer::new()
            .allow_origin(origin)
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
        _ if cfg.is_production => {
            // FRONTEND_URL is enforced by Config in production; deny all otherwise
            CorsLayer::new()
                .allow_origin(AllowOrigin::exact(HeaderValue::from_static(
                    "http://invalid",
                )))
                .allow_methods(methods)
                .allow_headers(headers)
        }
        _ => CorsLayer::new()
            .allow_origin(AllowOrigin::mirror_request())
            .allow_methods(methods)
            .allow_headers(headers)
            .allow_credentials(true),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "api=debug,feedback_api=debug,axum=info,tower_http=info".into()),
        )
        .init();

    let cfg = Config::from_env()?;
    info!(?cfg, "Starting feedback backend");

    let password_hasher: Arc<dyn PasswordHashPort> =
        Arc::new(Argon2PasswordHasher::new(cfg.hashing)?);

    let services = match cfg.store_backend {
        StoreBackend::Postgres => {
            let pool = api::infrastructure::db::connect_pool(
                &cfg.database_url,
                cfg.database_max_connections,
            )
            .await?;
            api::infrastructure::db::migrate(&pool).await?;
            let user_repo = Arc::new(
                api::infrastructure::db::repositories::user_repository_sqlx::SqlxUserRepository::new(
                    pool.clone(),
                ),
            );
            let feedback_repo = Arc::new(
                api::infrastructure::db::repositories::feedback_repository_sqlx::SqlxFeedbackRepository::new(
                    pool.clone(),
                ),
            );
            let health_probe = Arc::new(
                api::infrastructure::db::repositories::health_probe_sqlx::SqlxHealthProbe::new(pool),
            );
            AppServices::new(user_repo, feedback_repo, password_hasher, health_probe)
        }
        StoreBackend::Memory => {
            tracing::warn!("store_backend_memory_data_is_not_persisted");
            AppServices::in_memory(password_hasher)
        }
    };

    let ctx = AppContext::new(cfg.clone(), services);

    let app = api::presentation::http::api_router(ctx)
        .merge(SwaggerUi::new("/api/docs").url("/api/openapi.json", ApiDoc::openapi()))
        .layer(cors_layer(&cfg))
        .layer(
            TraceLayer::new_for_http().make_span_with(|req: &http::Request<_>| {
                let method = req.method().clone();
                let uri = req.uri().clone();
                let matched = req
                    .extensions()
                    .get::<MatchedPath>()
                    .map(|p| p.as_str().to_string())
                    .unwrap_or_default();
                tracing::info_span!("http", %method, %uri, matched_path = %matched)
            }),
        );

    let api_addr = SocketAddr::from(([0, 0, 0, 0], cfg.api_port));
    info!(%api_addr, "HTTP API listening");
    let listener = tokio::net::TcpListener::bind(api_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("HTTP API stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = ?e, "failed to listen for shutdown signal");
    }
}
