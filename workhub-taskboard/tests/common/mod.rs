/// Common test utilities for database-backed integration tests
///
/// Provides a [`TestContext`] that connects to a real PostgreSQL database,
/// runs this service's migrations, and builds the router.
///
/// Gated on `TASKBOARD_TEST_DATABASE_URL`: when the variable is unset the
/// tests skip instead of failing. The two services have unrelated schemas
/// (including two different `users` tables), so this service needs its own
/// test database.

use axum::{
    body::Body,
    http::{Request, Response},
};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;
use workhub_shared::{auth::session, db::migrations};
use workhub_taskboard::{
    app::{build_router, AppState, MEMBER_ROLE, TOKEN_ISSUER},
    config::{ApiConfig, AuthConfig, Config, DatabaseConfig},
    models::user::{CreateUser, User},
};

/// Token secret shared by the context and the bearer helper
pub const JWT_SECRET: &str = "integration-test-secret-32-bytes-ok!";

/// Test context holding the database and the router
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
}

impl TestContext {
    /// Creates a context against the configured test database
    ///
    /// Returns None (and prints a notice) when no test database is
    /// configured.
    pub async fn new() -> Option<Self> {
        let url = match std::env::var("TASKBOARD_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("TASKBOARD_TEST_DATABASE_URL not set; skipping database-backed test");
                return None;
            }
        };

        migrations::ensure_database_exists(&url)
            .await
            .expect("test database should be creatable");

        let db = PgPool::connect(&url)
            .await
            .expect("test database should be reachable");

        sqlx::migrate!("./migrations")
            .run(&db)
            .await
            .expect("migrations should apply");

        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
            },
            database: DatabaseConfig {
                url,
                max_connections: 5,
            },
            auth: AuthConfig {
                jwt_secret: JWT_SECRET.to_string(),
            },
        };

        let state = AppState::new(db.clone(), config);
        let app = build_router(state);

        Some(TestContext { db, app })
    }

    /// Mints a bearer header for an authenticated caller
    pub fn bearer(&self, user_id: Uuid) -> String {
        let claims = session::Claims::new(user_id, MEMBER_ROLE, TOKEN_ISSUER);
        let token = session::create_token(&claims, JWT_SECRET).expect("token");
        format!("Bearer {}", token)
    }

    /// Inserts a user directly, bypassing the registration endpoint
    pub async fn create_user(&self, prefix: &str) -> User {
        let username = format!("{}-{}", prefix, Uuid::new_v4());
        User::create(
            &self.db,
            CreateUser {
                email: format!("{}@example.com", username),
                username,
                mobile: None,
                password_hash: "test-hash".to_string(),
            },
        )
        .await
        .expect("user insert should succeed")
    }

    /// Sends an authenticated JSON request through the router
    pub async fn send_json(
        &self,
        method: &str,
        uri: &str,
        caller: Uuid,
        body: serde_json::Value,
    ) -> Response<Body> {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method(method)
                    .uri(uri)
                    .header("authorization", self.bearer(caller))
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Sends an authenticated GET through the router
    pub async fn get(&self, uri: &str, caller: Uuid) -> Response<Body> {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(uri)
                    .header("authorization", self.bearer(caller))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Deletes test tasks and users, cascading join-table rows
    pub async fn cleanup(&self, task_ids: &[Uuid], user_ids: &[Uuid]) {
        sqlx::query("DELETE FROM tasks WHERE id = ANY($1)")
            .bind(task_ids)
            .execute(&self.db)
            .await
            .expect("task cleanup should succeed");
        sqlx::query("DELETE FROM users WHERE id = ANY($1)")
            .bind(user_ids)
            .execute(&self.db)
            .await
            .expect("user cleanup should succeed");
    }
}

/// Parses a response body as JSON
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
