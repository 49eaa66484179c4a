/// Application state and router builder
///
/// This module defines the shared application state and provides
/// a function to build the Axum router with all routes and middleware.
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                      # Health check (public)
/// ├── POST /signup/                # Account creation (public)
/// ├── POST /verify-email/          # OTP verification (public)
/// ├── POST /login/                 # Credential check + token issue (public)
/// ├── POST /upload-file/           # Bearer auth, role=ops
/// └── GET  /download-file/:id/     # Bearer auth, role=client
/// ```
///
/// # Middleware Stack
///
/// 1. Logging (tower-http TraceLayer)
/// 2. CORS (tower-http CorsLayer)
/// 3. Bearer authentication on the two file routes

use crate::{config::Config, download::DownloadLinkSigner, storage::FileStore};
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{get, post},
    Router,
};
use sqlx::PgPool;
use std::str::FromStr;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use uuid::Uuid;
use workhub_shared::{auth::session, email::Mailer};

use crate::models::user::UserType;

/// Token issuer string for this service
///
/// Tokens minted by the taskboard service carry a different issuer and are
/// rejected here.
pub const TOKEN_ISSUER: &str = "workhub-fileshare";

/// Shared application state
///
/// Cloned for each request handler via Axum's `State` extractor.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,

    /// Outbound mail delivery
    pub mailer: Arc<dyn Mailer>,

    /// On-disk blob store
    pub store: FileStore,

    /// Download-link token signer (owns the process-lifetime key)
    pub links: Arc<DownloadLinkSigner>,
}

impl AppState {
    /// Creates new application state
    ///
    /// The download-link key comes from configuration when present; otherwise
    /// a fresh per-process key is generated.
    pub fn new(db: PgPool, config: Config, mailer: Arc<dyn Mailer>) -> Self {
        let links = match config.download_token_secret.as_deref() {
            Some(secret) => DownloadLinkSigner::from_secret(secret),
            None => DownloadLinkSigner::ephemeral(),
        };
        let store = FileStore::new(&config.storage.upload_dir);

        Self {
            db,
            config: Arc::new(config),
            mailer,
            store,
            links: Arc::new(links),
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

    /// Caller role from the token
    pub role: UserType,
}

/// Builds the complete Axum router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/signup/", post(routes::accounts::signup))
        .route("/verify-email/", post(routes::accounts::verify_email))
        .route("/login/", post(routes::accounts::login));

    // File routes require a bearer token carrying a role
    let file_routes = Router::new()
        .route("/upload-file/", post(routes::files::upload_file))
        .route("/download-file/:file_id/", get(routes::files::download_file))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            bearer_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(file_routes)
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

    let role = UserType::from_str(&claims.role)
        .map_err(|_| crate::error::ApiError::Unauthorized("Invalid token".to_string()))?;

    req.extensions_mut().insert(Caller {
        user_id: claims.sub,
        role,
    });

    Ok(next.run(req).await)
}
