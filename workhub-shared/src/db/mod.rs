/// Database utilities
///
/// This module provides the PostgreSQL connection pool and migration helpers
/// used by both services. Each service owns its own `migrations/` directory
/// and passes its `sqlx::migrate!` migrator into [`migrations::run_migrations`].
///
/// # Modules
///
/// - [`pool`]: connection pool creation
/// - [`migrations`]: migration runner and database bootstrap helpers

pub mod migrations;
pub mod pool;
