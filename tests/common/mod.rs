#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bastion::cli::create_admin;
use bastion::modules::users::store::MemoryUserStore;
use bastion::router::init_router;
use bastion::state::AppState;
use bastion_auth::TokenService;
use bastion_config::{Environment, JwtConfig};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "testpass123";

pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<MemoryUserStore>,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-at-least-32-chars".to_string(),
        token_expiry: 3_600,
    }
}

pub fn setup_test_app(environment: Environment) -> TestApp {
    let store = Arc::new(MemoryUserStore::new());
    let state = AppState::new(
        store.clone(),
        TokenService::new(&test_jwt_config()),
        environment,
    );
    TestApp {
        router: init_router(state.clone(), &[]),
        state,
        store,
    }
}

pub fn generate_unique_email() -> String {
    format!("test-{}@test.com", Uuid::new_v4())
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_request(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

/// Sends a request and returns the status and the body parsed as JSON, or
/// as a JSON string when the body is plain text.
pub async fn send(app: &TestApp, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

/// Registers a user through the API and returns the response body.
pub async fn register(app: &TestApp, name: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "name": name, "email": email, "password": TEST_PASSWORD }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");
    body
}

/// Creates an admin directly in the store and returns a token for it.
pub async fn admin_token(app: &TestApp) -> String {
    let admin = create_admin(
        app.store.as_ref(),
        "Admin",
        &generate_unique_email(),
        TEST_PASSWORD,
    )
    .await
    .unwrap();
    app.state.tokens.issue(admin.id).unwrap()
}
