/// Application state and router builder
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                       # Health check (public)
/// ├── POST /auth/register/          # Account creation (public)
/// ├── POST /auth/login/             # Credential check + token issue (public)
/// ├── POST /tasks/create/           # Bearer auth
/// ├── PUT|PATCH /tasks/:id/assign/  # Bearer auth
/// └── GET  /users/:id/tasks/        # Bearer auth
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer authentication on the task routes

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;
use workhub_shared::auth::session;

/// Token issuer string for this service
///
/// Tokens minted by the fileshare service carry a different issuer and are
/// rejected here.
pub const TOKEN_ISSUER: &str = "workhub-taskboard";

/// Role string carried in this service's tokens
///
/// The taskboard has no role tiers; every account gets the same claim.
pub const MEMBER_ROLE: &str = "member";

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the session token secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.auth.jwt_secret
    }
}

/// Authenticated caller injected into request extensions by the auth layer
#[derive(Debug, Clone, Copy)]
pub struct Caller {
    /// Authenticated user ID
    pub user_id: Uuid,
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/auth/register/", post(routes::auth::register))
        .route("/auth/login/", post(routes::auth::login));

    // Task routes require a bearer token
    let task_routes = Router::new()
        .route("/tasks/create/", post(routes::tasks::create_task))
        .route(
            "/tasks/:task_id/assign/",
            put(routes::tasks::assign_task).patch(routes::tasks::assign_task),
        )
        .route("/users/:user_id/tasks/", get(routes::tasks::list_user_tasks))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(task_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer authentication middleware layer
///
/// Extracts and validates the session token from the Authorization header,
/// then injects a [`Caller`] into request extensions.
async fn bearer_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            crate::error::ApiError::Unauthorized("Missing authorization header".to_string())
        })?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| crate::error::ApiError::BadRequest("Expected Bearer token".to_string()))?;

    let claims = session::validate_token(token, state.jwt_secret(), TOKEN_ISSUER)?;

    req.extensions_mut().insert(Caller {
        user_id: claims.sub,
    });

    Ok(next.run(req).await)
}
