// ==========================
// crates/backend-lib/tests/api.rs
// ==========================
//! End-to-end tests driving the router in-process.
use authapp_backend_lib::{config::Settings, router::create_router, AppState};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn test_app() -> (Router, Arc<AppState>) {
    let mut settings = Settings::default();
    settings.auth.password_cost_log_n = 8;
    let state = Arc::new(AppState::new(&settings).unwrap());
    (create_router(state.clone()), state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn logout_request(authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(Method::POST).uri("/api/auth/logout");
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn register(app: &Router, username: &str, password: &str, email: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/auth/register",
            json!({ "username": username, "password": password, "emailAddress": email }),
        ),
    )
    .await
}

async fn login(app: &Router, username: &str, password: &str) -> (StatusCode, Value) {
    send(
        app,
        post_json(
            "/api/auth/login",
            json!({ "username": username, "password": password }),
        ),
    )
    .await
}

#[tokio::test]
async fn test_register_returns_public_fields_only() {
    let (app, _) = test_app();
    let (status, body) = register(&app, "alice", "secret123", "alice@x.com").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["username"], json!("alice"));
    assert_eq!(body["data"]["emailAddress"], json!("alice@x.com"));
    assert!(body["data"]["userId"].is_string());
    assert!(body["data"]["registrationDate"].is_string());
    assert!(!body.to_string().contains("scrypt"));
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let (app, _) = test_app();
    register(&app, "alice", "secret123", "alice@x.com").await;

    let (status, body) = register(&app, "alice", "another1", "other@x.com").await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["errorCode"], json!("USR_001"));
}

#[tokio::test]
async fn test_registration_validation() {
    let (app, state) = test_app();

    let (status, _) = register(&app, "al", "secret123", "alice@x.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = register(&app, "alice", "123", "alice@x.com").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = register(&app, "alice", "secret123", "not-an-email").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], json!("VAL_001"));

    assert_eq!(state.users.count_all(), 0);
}

#[tokio::test]
async fn test_registration_accepts_long_password_and_single_label_domain() {
    let (app, _) = test_app();
    let long_password = "p".repeat(200);

    let (status, _) = register(&app, "alice", &long_password, "alice@x.com").await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = login(&app, "alice", &long_password).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = register(&app, "bob", "secret456", "bob@localhost").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["emailAddress"], json!("bob@localhost"));
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let (app, _) = test_app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], json!(false));
}

#[tokio::test]
async fn test_login_outcomes() {
    let (app, state) = test_app();
    register(&app, "alice", "secret123", "alice@x.com").await;

    let (status, body) = login(&app, "nobody", "secret123").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["errorCode"], json!("USR_002"));

    let (status, body) = login(&app, "alice", "wrong").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], json!("AUTH_001"));
    assert!(!state.users.has_token("alice"));

    let (status, _) = login(&app, "", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = login(&app, "alice", "secret123").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["tokenType"], json!("Bearer"));
    let token = body["data"]["authToken"].as_str().unwrap();
    assert!(state.users.is_token_valid("alice", token));
}

#[tokio::test]
async fn test_logout_flow() {
    let (app, state) = test_app();
    register(&app, "alice", "secret123", "alice@x.com").await;
    let (_, body) = login(&app, "alice", "secret123").await;
    let token = body["data"]["authToken"].as_str().unwrap().to_string();
    let bearer = format!("Bearer {token}");

    let (status, body) = send(&app, logout_request(Some(&bearer))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], json!(true));
    assert!(!state.users.has_token("alice"));

    // The same token no longer logs anyone out
    let (status, body) = send(&app, logout_request(Some(&bearer))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], json!("AUTH_004"));
}

#[tokio::test]
async fn test_logout_header_handling() {
    let (app, _) = test_app();

    let (status, body) = send(&app, logout_request(None)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], json!("AUTH_003"));

    let (status, _) = send(&app, logout_request(Some("Token abc"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, logout_request(Some("Bearer not-a-token"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_user_management_endpoints() {
    let (app, _) = test_app();
    register(&app, "alice", "secret123", "alice@x.com").await;
    register(&app, "bob", "secret456", "bob@x.com").await;

    let (status, body) = send(&app, get("/api/users")).await;
    assert_eq!(status, StatusCode::OK);
    let users = body["data"].as_array().unwrap();
    assert_eq!(users.len(), 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert_eq!(user["accountActive"], json!(true));
    }

    let (status, body) = send(&app, get("/api/users/alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["emailAddress"], json!("alice@x.com"));

    let (status, _) = send(&app, get("/api/users/ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_deactivation_blocks_login() {
    let (app, _) = test_app();
    register(&app, "alice", "secret123", "alice@x.com").await;

    let deactivate = |name: &str| {
        Request::builder()
            .method(Method::PUT)
            .uri(format!("/api/users/{name}/deactivate"))
            .body(Body::empty())
            .unwrap()
    };

    let (status, body) = send(&app, deactivate("alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["accountActive"], json!(false));

    let (status, _) = send(&app, deactivate("ghost")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = login(&app, "alice", "secret123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["errorCode"], json!("AUTH_002"));
}

#[tokio::test]
async fn test_system_endpoints() {
    let (app, _) = test_app();
    register(&app, "alice", "secret123", "alice@x.com").await;
    register(&app, "bob", "secret456", "bob@x.com").await;
    login(&app, "alice", "secret123").await;

    let (status, body) = send(&app, get("/api/system/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], json!("UP"));

    let (_, body) = send(&app, get("/api/system/stats")).await;
    assert_eq!(body["data"]["totalRegisteredUsers"], json!(2));
    assert_eq!(body["data"]["activeUsers"], json!(2));
    assert_eq!(body["data"]["inactiveUsers"], json!(0));
    assert_eq!(body["data"]["usersWithActiveTokens"], json!(1));

    let (_, body) = send(&app, get("/api/system/info")).await;
    assert_eq!(body["data"]["totalUsers"], json!(2));

    let (status, body) = send(&app, get("/api/system/version")).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["version"].is_string());
}
