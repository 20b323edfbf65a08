use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use api::bootstrap::app_context::{AppContext, AppServices};
use api::bootstrap::config::{Config, StoreBackend};
use api::infrastructure::crypto::{Argon2PasswordHasher, HashingParams};
use api::presentation::http::api_router;

fn app() -> Router {
    let mut cfg = Config::from_lookup(|_| None).unwrap();
    cfg.store_backend = StoreBackend::Memory;
    let hasher = Arc::new(Argon2PasswordHasher::new(HashingParams::new(1024, 1, 1)).unwrap());
    api_router(AppContext::new(cfg, AppServices::in_memory(hasher)))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(method).uri(uri);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match body {
        Some(b) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(b.to_string())),
        None => req.body(Body::empty()),
    }
    .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn alice() -> Value {
    json!({
        "username": "alice",
        "password": "secret123",
        "email": "a@x.com",
        "first_name": "Alice",
        "last_name": "A"
    })
}

async fn register(app: &Router, body: Value) -> String {
    let (status, resp) = send(app, Method::POST, "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "{resp}");
    resp["access_token"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_then_login_round_trip() {
    let app = app();
    let (status, resp) = send(&app, Method::POST, "/api/auth/register", None, Some(alice())).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(resp["user"]["username"], "alice");
    assert_eq!(resp["user"]["email"], "a@x.com");
    assert!(resp["user"].get("password").is_none());

    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "secret123"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let token = resp["access_token"].as_str().unwrap();

    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["first_name"], "Alice");
}

#[tokio::test]
async fn bad_password_and_unknown_user_look_the_same() {
    let app = app();
    register(&app, alice()).await;

    let (wrong_status, wrong) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "alice", "password": "wrong-password"})),
    )
    .await;
    let (missing_status, missing) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "nobody", "password": "secret123"})),
    )
    .await;

    assert_eq!(wrong_status, StatusCode::UNAUTHORIZED);
    assert_eq!(missing_status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong, missing);
    assert_eq!(wrong["errors"]["username"][0], "Invalid username/password.");
}

#[tokio::test]
async fn login_form_bounds_are_reported_per_field() {
    let app = app();
    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"username": "", "password": "123"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["errors"]["username"][0], "This field is required.");
    assert_eq!(
        resp["errors"]["password"][0],
        "Field must be between 6 and 55 characters long."
    );
}

#[tokio::test]
async fn duplicate_registrations_are_conflicts() {
    let app = app();
    register(&app, alice()).await;

    let mut same_email = alice();
    same_email["username"] = json!("alicia");
    let (status, resp) =
        send(&app, Method::POST, "/api/auth/register", None, Some(same_email)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(resp["errors"]["email"][0], "Email already registered.");

    let mut same_name = alice();
    same_name["email"] = json!("other@x.com");
    let (status, resp) =
        send(&app, Method::POST, "/api/auth/register", None, Some(same_name)).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(resp["errors"]["username"].is_array());
}

#[tokio::test]
async fn invalid_registration_is_unprocessable() {
    let app = app();
    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({"username": "alice", "email": "nope"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    let errors = resp["errors"].as_object().unwrap();
    assert_eq!(errors["email"][0], "Invalid email address.");
    assert!(errors.contains_key("password"));
    assert!(errors.contains_key("first_name"));
    assert!(!errors.contains_key("username"));
}

#[tokio::test]
async fn short_registration_password_is_rejected_up_front() {
    let app = app();
    let mut body = alice();
    body["password"] = json!("abc");
    let (status, resp) = send(&app, Method::POST, "/api/auth/register", None, Some(body)).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp["errors"]["password"][0],
        "Field must be between 6 and 55 characters long."
    );
}

#[tokio::test]
async fn non_string_fields_come_back_as_field_errors() {
    let app = app();
    let token = register(&app, alice()).await;

    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/users/alice/feedback",
        Some(&token),
        Some(json!({"title": null, "content": 5})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["errors"]["title"][0], "This field is required.");
    assert_eq!(resp["errors"]["content"][0], "Field must be a string.");

    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!(["alice", "secret123"])),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(resp["errors"]["body"][0], "Request body must be a JSON object.");
}

#[tokio::test]
async fn feedback_lifecycle_for_the_owner() {
    let app = app();
    let token = register(&app, alice()).await;

    let too_long = "x".repeat(101);
    let (status, resp) = send(
        &app,
        Method::POST,
        "/api/users/alice/feedback",
        Some(&token),
        Some(json!({"title": too_long, "content": "body"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        resp["errors"]["title"][0],
        "Field cannot be longer than 100 characters."
    );

    let exact = "x".repeat(100);
    let (status, created) = send(
        &app,
        Method::POST,
        "/api/users/alice/feedback",
        Some(&token),
        Some(json!({"title": exact, "content": "body"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["username"], "alice");
    let id = created["id"].as_i64().unwrap();

    let (status, profile) = send(&app, Method::GET, "/api/users/alice", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["feedback"].as_array().unwrap().len(), 1);

    let uri = format!("/api/feedback/{id}");
    let (status, updated) = send(
        &app,
        Method::PUT,
        &uri,
        Some(&token),
        Some(json!({"title": "Better title", "content": "new body"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Better title");

    let (status, _) = send(&app, Method::DELETE, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn users_cannot_touch_each_other() {
    let app = app();
    let alice_token = register(&app, alice()).await;
    let bob_token = register(
        &app,
        json!({
            "username": "bob",
            "password": "hunter22",
            "email": "b@x.com",
            "first_name": "Bob",
            "last_name": "B"
        }),
    )
    .await;

    let (_, created) = send(
        &app,
        Method::POST,
        "/api/users/alice/feedback",
        Some(&alice_token),
        Some(json!({"title": "Mine", "content": "private"})),
    )
    .await;
    let uri = format!("/api/feedback/{}", created["id"]);

    let (status, _) = send(&app, Method::GET, "/api/users/alice", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/users/alice/feedback",
        Some(&bob_token),
        Some(json!({"title": "t", "content": "c"})),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, &uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, "/api/users/alice", Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = send(&app, Method::GET, "/api/users/alice", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn deleting_an_account_cascades_to_its_feedback() {
    let app = app();
    let token = register(&app, alice()).await;
    let mut ids = Vec::new();
    for title in ["one", "two"] {
        let (_, created) = send(
            &app,
            Method::POST,
            "/api/users/alice/feedback",
            Some(&token),
            Some(json!({"title": title, "content": "c"})),
        )
        .await;
        ids.push(created["id"].as_i64().unwrap());
    }

    let (status, _) = send(&app, Method::DELETE, "/api/users/alice", Some(&token), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    for id in ids {
        let (status, _) =
            send(&app, Method::GET, &format!("/api/feedback/{id}"), Some(&token), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
    let (status, _) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // The freed username and email can be registered again.
    register(&app, alice()).await;
}

#[tokio::test]
async fn health_reports_ok_for_memory_store() {
    let app = app();
    let (status, resp) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["status"], "ok");
}
