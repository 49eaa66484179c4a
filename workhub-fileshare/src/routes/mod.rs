/// API route handlers
///
/// Handlers are organized by resource:
///
/// - `health`: health check endpoint
/// - `accounts`: signup, email verification and login
/// - `files`: role-gated upload and download-link issuance

pub mod accounts;
pub mod files;
pub mod health;
