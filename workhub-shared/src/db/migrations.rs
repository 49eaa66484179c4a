/// Database migration runner
///
/// Each service keeps its own `migrations/` directory (the two backends have
/// unrelated schemas, including two unrelated `users` tables) and embeds it
/// with `sqlx::migrate!`. The resulting migrator is handed to
/// [`run_migrations`] at startup.
///
/// # Example
///
/// ```ignore
/// use workhub_shared::db::pool::{create_pool, DatabaseConfig};
/// use workhub_shared::db::migrations::run_migrations;
///
/// let pool = create_pool(DatabaseConfig::default()).await?;
/// run_migrations(&pool, &sqlx::migrate!("./migrations")).await?;
/// ```

use sqlx::{
    migrate::{MigrateDatabase, Migrator},
    postgres::PgPool,
    Postgres,
};
use tracing::{debug, info, warn};

/// Runs all pending database migrations
///
/// # Errors
///
/// Returns an error if a migration file is malformed, a migration fails to
/// execute, or the database connection is lost mid-run.
pub async fn run_migrations(pool: &PgPool, migrator: &Migrator) -> Result<(), sqlx::migrate::MigrateError> {
    info!("Starting database migrations");

    match migrator.run(pool).await {
        Ok(()) => {
            info!("All database migrations completed successfully");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Creates the database if it doesn't exist
///
/// Useful for development and testing; in production the database should
/// already exist.
///
/// # Errors
///
/// Returns an error if the server is unreachable or the caller lacks the
/// permission to create databases.
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
        info!("Database created successfully");
    } else {
        debug!("Database already exists");
    }

    Ok(())
}
