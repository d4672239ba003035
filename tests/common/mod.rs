#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use fake::Fake;
use fake::faker::lorem::en::Sentence;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

use todo_api::modules::todos::{InMemoryTodoRepository, TodoRepository};
use todo_api::router::init_router;
use todo_api::state::AppState;
use todo_auth::create_access_token;
use todo_config::{CorsConfig, JwtConfig};

pub fn get_test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "test-secret-key-at-least-32-characters-long".to_string(),
        access_token_expiry: 3600,
    }
}

pub fn setup_app(repository: Arc<dyn TodoRepository>) -> Router {
    let state = AppState::new(repository, get_test_jwt_config(), CorsConfig::default());
    init_router(state)
}

/// App backed by an empty in-memory store, plus a handle to inspect it.
pub fn setup_memory_app() -> (Router, Arc<InMemoryTodoRepository>) {
    let repository = Arc::new(InMemoryTodoRepository::new());
    (setup_app(repository.clone()), repository)
}

pub fn token_for(user_id: Uuid) -> String {
    create_access_token(user_id, &get_test_jwt_config()).unwrap()
}

/// A title that always satisfies the length bounds.
pub fn fake_title() -> String {
    Sentence(3..8).fake()
}

pub fn list_request(token: Option<&str>, query: &str) -> Request<Body> {
    let uri = if query.is_empty() {
        "/todo/listTodos".to_string()
    } else {
        format!("/todo/listTodos?{}", query)
    };

    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::empty()).unwrap()
}

pub fn create_request(token: Option<&str>, body: Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/todo/createTodo")
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, body)
}

pub async fn create_todo(app: &Router, token: &str, title: &str) -> Value {
    let (status, body) = send(
        app,
        create_request(Some(token), serde_json::json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "create failed: {}", body);
    body["data"].clone()
}
