/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: health check endpoint
/// - `auth`: registration and login
/// - `tasks`: task creation, assignment and per-user listing

pub mod auth;
pub mod health;
pub mod tasks;
