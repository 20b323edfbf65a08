use crate::application::forms::{FieldErrors, LOGIN_FORM, REGISTER_FORM};
use crate::application::ports::user_repository::UniqueField;
use crate::application::use_cases::auth::login::{Login as LoginUc, LoginRequest as LoginDto};
use crate::application::use_cases::auth::me::GetMe;
use crate::application::use_cases::auth::register::{
    Register as RegisterUc, RegisterError, RegisterRequest as RegisterDto,
};
use crate::bootstrap::app_context::AppContext;
use crate::bootstrap::config::Config;
use crate::domain::users::user::User;
use crate::presentation::http::errors::{ApiError, internal};
use crate::presentation::http::form::{FormBody, validate_body};
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::{get, post},
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const INVALID_CREDENTIALS: &str = "Invalid username/password.";

#[derive(Debug, Deserialize, ToSchema)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct UserResponse {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        UserResponse {
            username: u.username,
            email: u.email,
            first_name: u.first_name,
            last_name: u.last_name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub access_token: String,
    pub user: UserResponse,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

pub fn routes(ctx: AppContext) -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(me))
        .with_state(ctx)
}

fn conflict_errors(field: UniqueField) -> FieldErrors {
    match field {
        UniqueField::Username => {
            FieldErrors::single("username", "Username taken. Please pick another.")
        }
        UniqueField::Email => FieldErrors::single("email", "Email already registered."),
    }
}

#[utoipa::path(post, path = "/api/auth/register", tag = "Auth", request_body = RegisterRequest, security(()), responses(
    (status = 201, body = LoginResponse),
    (status = 409, body = crate::presentation::http::errors::FormErrorResponse),
    (status = 422, body = crate::presentation::http::errors::FormErrorResponse)
))]
pub async fn register(
    State(ctx): State<AppContext>,
    body: FormBody,
) -> Result<(StatusCode, HeaderMap, Json<LoginResponse>), ApiError> {
    let form = validate_body(&REGISTER_FORM, &body).map_err(ApiError::invalid)?;
    let dto = RegisterDto::from(form);
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let uc = RegisterUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
    };
    let user = uc.execute(&dto).await.map_err(|e| match e {
        RegisterError::Conflict(field) => {
            ApiError::Form(StatusCode::CONFLICT, conflict_errors(field))
        }
        RegisterError::Other(err) => internal(err).into(),
    })?;
    let (headers, token) = issue_session(&ctx.cfg, &user.username)?;
    Ok((
        StatusCode::CREATED,
        headers,
        Json(LoginResponse {
            access_token: token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "Auth", request_body = LoginRequest, security(()), responses(
    (status = 200, body = LoginResponse),
    (status = 401, body = crate::presentation::http::errors::FormErrorResponse),
    (status = 422, body = crate::presentation::http::errors::FormErrorResponse)
))]
pub async fn login(
    State(ctx): State<AppContext>,
    body: FormBody,
) -> Result<(HeaderMap, Json<LoginResponse>), ApiError> {
    let mut form = validate_body(&LOGIN_FORM, &body).map_err(ApiError::invalid)?;
    let dto = LoginDto {
        username: form.take("username"),
        password: form.take("password"),
    };
    let repo = ctx.user_repo();
    let hasher = ctx.password_hasher();
    let uc = LoginUc {
        repo: repo.as_ref(),
        hasher: hasher.as_ref(),
    };
    let user = uc
        .execute(&dto)
        .await
        .map_err(internal)?
        .into_user()
        .ok_or_else(|| {
            ApiError::Form(
                StatusCode::UNAUTHORIZED,
                FieldErrors::single("username", INVALID_CREDENTIALS),
            )
        })?;
    tracing::info!(username = %user.username, "login_succeeded");
    let (headers, token) = issue_session(&ctx.cfg, &user.username)?;
    Ok((
        headers,
        Json(LoginResponse {
            access_token: token,
            user: user.into(),
        }),
    ))
}

#[utoipa::path(get, path = "/api/auth/me", tag = "Auth", responses((status = 200, body = UserResponse)))]
pub async fn me(
    State(ctx): State<AppContext>,
    bearer: Result<Bearer, StatusCode>,
) -> Result<Json<UserResponse>, StatusCode> {
    let username = validate_bearer(&ctx.cfg, bearer?)?;
    let repo = ctx.user_repo();
    let uc = GetMe {
        repo: repo.as_ref(),
    };
    let user = uc
        .execute(&username)
        .await
        .map_err(internal)?
        .ok_or(StatusCode::UNAUTHORIZED)?;
    Ok(Json(user.into()))
}

// --- Bearer extractor & JWT utils ---
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

pub struct Bearer(pub String);

#[axum::async_trait]
impl<S> FromRequestParts<S> for Bearer
where
    S: Send + Sync,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // 1) Prefer Authorization header if present
        if let Some(auth) = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(t) = auth.strip_prefix("Bearer ") {
                return Ok(Bearer(t.to_string()));
            }
        }

        // 2) Fallback to HttpOnly cookie `access_token`
        if let Some(cookie_hdr) = parts
            .headers
            .get(axum::http::header::COOKIE)
            .and_then(|v| v.to_str().ok())
        {
            if let Some(token) = get_cookie(cookie_hdr, "access_token") {
                return Ok(Bearer(token));
            }
        }

        Err(StatusCode::UNAUTHORIZED)
    }
}

/// Returns the username carried by a valid token.
pub fn validate_bearer(cfg: &Config, bearer: Bearer) -> Result<String, StatusCode> {
    let data = jsonwebtoken::decode::<Claims>(
        &bearer.0,
        &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|_| StatusCode::UNAUTHORIZED)?;
    Ok(data.claims.sub)
}

/// Signs a token for `username` and returns it with the matching cookie header.
pub fn issue_session(cfg: &Config, username: &str) -> Result<(HeaderMap, String), StatusCode> {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: username.to_string(),
        exp: now + (cfg.jwt_expires_secs.max(0) as usize),
    };
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()),
    )
    .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    let mut headers = HeaderMap::new();
    let cookie = build_access_cookie(&token, cfg.jwt_expires_secs, cfg.secure_cookies());
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_str(&cookie)
            .unwrap_or(axum::http::HeaderValue::from_static("")),
    );
    Ok((headers, token))
}

// --- Cookie helpers & logout ---

fn get_cookie(cookie_header: &str, name: &str) -> Option<String> {
    for part in cookie_header.split(';') {
        let kv = part.trim();
        if let Some((k, v)) = kv.split_once('=') {
            if k.trim() == name {
                return Some(v.trim().to_string());
            }
        }
    }
    None
}

fn build_access_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let secure_attr = if secure { "; Secure" } else { "" };
    format!(
        "access_token={}; HttpOnly{}; Path=/; Max-Age={}; SameSite=Lax",
        token,
        secure_attr,
        max_age_secs.max(0)
    )
}

pub fn clear_session(cfg: &Config) -> HeaderMap {
    let mut headers = HeaderMap::new();
    let cookie = if cfg.secure_cookies() {
        "access_token=; HttpOnly; Secure; Path=/; Max-Age=0; SameSite=Lax"
    } else {
        "access_token=; HttpOnly; Path=/; Max-Age=0; SameSite=Lax"
    };
    headers.insert(
        axum::http::header::SET_COOKIE,
        axum::http::HeaderValue::from_static(cookie),
    );
    headers
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "Auth", responses((status = 204)))]
pub async fn logout(State(ctx): State<AppContext>) -> (HeaderMap, StatusCode) {
    (clear_session(&ctx.cfg), StatusCode::NO_CONTENT)
}
