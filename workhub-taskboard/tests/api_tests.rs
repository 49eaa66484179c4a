/// Router-level tests for the task-manager API
///
/// These tests exercise request validation and authentication through the
/// real router. They use a lazily connected pool pointed at an unreachable
/// address, so every asserted path must reject the request before any query
/// runs.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;
use uuid::Uuid;
use workhub_shared::auth::session;
use workhub_taskboard::{
    app::{build_router, AppState, MEMBER_ROLE, TOKEN_ISSUER},
    config::{ApiConfig, AuthConfig, Config, DatabaseConfig},
};

const JWT_SECRET: &str = "router-test-secret-at-least-32-bytes";

fn test_app() -> Router {
    let config = Config {
        api: ApiConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        database: DatabaseConfig {
            // Nothing listens here; tests never reach the database
            url: "postgresql://127.0.0.1:1/unreachable".to_string(),
            max_connections: 1,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.to_string(),
        },
    };

    let db = PgPoolOptions::new()
        .max_connections(1)
        .connect_lazy(&config.database.url)
        .expect("lazy pool");

    build_router(AppState::new(db, config))
}

fn bearer() -> String {
    let claims = session::Claims::new(Uuid::new_v4(), MEMBER_ROLE, TOKEN_ISSUER);
    format!(
        "Bearer {}",
        session::create_token(&claims, JWT_SECRET).expect("token")
    )
}

#[tokio::test]
async fn register_rejects_invalid_payload_with_field_errors() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/auth/register/")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "username": "alice",
                        "email": "not-an-email",
                        "password": "short"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "validation_error");
    let fields: Vec<&str> = json["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));
}

#[tokio::test]
async fn create_task_requires_authentication() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/create/")
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "name": "Ship release",
                        "description": "Tag and deploy",
                        "task_type": "deployment"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn create_task_rejects_invalid_payload() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/tasks/create/")
                .header("authorization", bearer())
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({
                        "name": "",
                        "description": "Tag and deploy",
                        "task_type": "deployment"
                    })
                    .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["error"], "validation_error");
}

#[tokio::test]
async fn assign_task_requires_authentication() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(&format!("/tasks/{}/assign/", Uuid::new_v4()))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({"assigned_users": []}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn assign_task_accepts_patch_method() {
    let app = test_app();

    // PATCH reaches the same handler as PUT; without auth both stop at 401
    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri(&format!("/tasks/{}/assign/", Uuid::new_v4()))
                .header("content-type", "application/json")
                .body(Body::from(
                    serde_json::json!({"assigned_users": []}).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_user_tasks_requires_authentication() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/users/{}/tasks/", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn list_user_tasks_rejects_malformed_bearer_scheme() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/users/{}/tasks/", Uuid::new_v4()))
                .header("authorization", "Basic abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn list_user_tasks_rejects_foreign_issuer_token() {
    let app = test_app();

    // Token signed with the right secret but minted by another service
    let claims = session::Claims::new(Uuid::new_v4(), MEMBER_ROLE, "workhub-fileshare");
    let token = session::create_token(&claims, JWT_SECRET).unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri(&format!("/users/{}/tasks/", Uuid::new_v4()))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
