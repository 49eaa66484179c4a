//! # WorkHub Task-Manager API
//!
//! HTTP backend for the task-manager service: task creation, assignment of a
//! task's user set, and per-user task listing. Authenticated callers only;
//! there are no roles here - this service is unrelated to the file-sharing
//! backend and the two deliberately share no domain types.
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `models`: database models
//! - `routes`: API route handlers

pub mod app;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
