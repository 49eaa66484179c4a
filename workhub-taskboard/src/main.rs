//! # WorkHub Task-Manager API Server
//!
//! Binary entry point: loads configuration, connects the database pool, runs
//! migrations, and serves the Axum application.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p workhub-taskboard
//! ```

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use workhub_shared::db::{migrations, pool};
use workhub_taskboard::{
    app::{build_router, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "workhub_taskboard=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(
        "WorkHub task-manager API v{} starting...",
        env!("CARGO_PKG_VERSION")
    );

    let config = Config::from_env()?;

    migrations::ensure_database_exists(&config.database.url).await?;

    let db = pool::create_pool(pool::DatabaseConfig {
        url: config.database.url.clone(),
        max_connections: config.database.max_connections,
        ..Default::default()
    })
    .await?;

    migrations::run_migrations(&db, &sqlx::migrate!("./migrations")).await?;

    let bind_address = config.bind_address();
    let state = AppState::new(db, config);
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!("Server listening on http://{}", bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
