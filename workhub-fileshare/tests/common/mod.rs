/// Common test utilities for database-backed integration tests
///
/// Provides a [`TestContext`] that connects to a real PostgreSQL database,
/// runs this service's migrations, and builds the router with a
/// `RecordingMailer` so tests can assert on outbound mail.
///
/// Gated on `FILESHARE_TEST_DATABASE_URL`: when the variable is unset the
/// tests skip instead of failing, so the suite stays runnable without a
/// database. The two services have unrelated schemas (including two
/// different `users` tables), so this service needs its own test database.

use axum::{
    body::Body,
    http::{Request, Response},
};
use sqlx::PgPool;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;
use workhub_fileshare::{
    app::{build_router, AppState, TOKEN_ISSUER},
    config::{ApiConfig, AuthConfig, Config, DatabaseConfig, MailConfig, StorageConfig},
};
use workhub_shared::{auth::session, db::migrations, email::RecordingMailer};

/// Token secret shared by the context and the bearer helper
pub const JWT_SECRET: &str = "integration-test-secret-32-bytes-ok!";

/// Test context holding the database, the router and the recording mailer
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub mailer: Arc<RecordingMailer>,
}

impl TestContext {
    /// Creates a context against the configured test database
    ///
    /// Returns None (and prints a notice) when no test database is
    /// configured.
    pub async fn new() -> Option<Self> {
        let url = match std::env::var("FILESHARE_TEST_DATABASE_URL") {
            Ok(url) => url,
            Err(_) => {
                eprintln!("FILESHARE_TEST_DATABASE_URL not set; skipping database-backed test");
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
            mail: MailConfig {
                // Never contacted; the context injects a RecordingMailer
                api_url: "http://127.0.0.1:1/emails".to_string(),
                api_key: "test".to_string(),
                from: "noreply@example.com".to_string(),
            },
            storage: StorageConfig {
                upload_dir: std::env::temp_dir()
                    .join(format!("workhub-it-{}", Uuid::new_v4()))
                    .to_string_lossy()
                    .into_owned(),
            },
            download_token_secret: Some("download-integration-secret-32-byte".to_string()),
        };

        let mailer = Arc::new(RecordingMailer::new());
        let state = AppState::new(db.clone(), config, mailer.clone());
        let app = build_router(state);

        Some(TestContext { db, app, mailer })
    }

    /// Mints a bearer header for a caller with the given role
    pub fn bearer(&self, user_id: Uuid, role: &str) -> String {
        let claims = session::Claims::new(user_id, role, TOKEN_ISSUER);
        let token = session::create_token(&claims, JWT_SECRET).expect("token");
        format!("Bearer {}", token)
    }

    /// Sends a JSON POST through the router
    pub async fn post_json(&self, uri: &str, body: serde_json::Value) -> Response<Body> {
        self.app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    /// Deletes a test user by email, cascading OTP and file records
    pub async fn cleanup_user(&self, email: &str) {
        sqlx::query("DELETE FROM users WHERE email = $1")
            .bind(email)
            .execute(&self.db)
            .await
            .expect("cleanup should succeed");
    }
}

/// Builds a single-field multipart body for the upload endpoint
pub fn multipart_file(file_name: &str, contents: &[u8]) -> (String, Vec<u8>) {
    let boundary = "workhub-test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{}\"\r\n\
             Content-Type: application/octet-stream\r\n\r\n",
            boundary, file_name
        )
        .as_bytes(),
    );
    body.extend_from_slice(contents);
    body.extend_from_slice(format!("\r\n--{}--\r\n", boundary).as_bytes());

    (
        format!("multipart/form-data; boundary={}", boundary),
        body,
    )
}

/// Parses a response body as JSON
pub async fn response_json(response: Response<Body>) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
