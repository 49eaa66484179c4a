/// Health check endpoint
///
/// Reports connectivity to this service's two external collaborators: the
/// database and the on-disk blob store.
///
/// # Endpoint
///
/// ```text
/// GET /health
/// ```
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "database": "connected",
///   "storage": "ready"
/// }
/// ```

use crate::app::AppState;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use workhub_shared::db::pool;

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status: "healthy" when every collaborator responds
    pub status: String,

    /// Application version
    pub version: String,

    /// Database status
    pub database: String,

    /// Blob store status
    pub storage: String,
}

/// Health check handler
///
/// Degraded as soon as either the database or the upload directory is
/// unavailable; the endpoint itself always answers 200.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_up = pool::health_check(&state.db).await.is_ok();
    let storage_up = state.store.ready().await;

    let status = if database_up && storage_up {
        "healthy"
    } else {
        "degraded"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: if database_up { "connected" } else { "disconnected" }.to_string(),
        storage: if storage_up { "ready" } else { "unavailable" }.to_string(),
    })
}
