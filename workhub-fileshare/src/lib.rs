//! # WorkHub File-Sharing API
//!
//! HTTP backend for the file-sharing service: signup with email OTP
//! verification for client users, login, role-gated upload (ops) and
//! role-gated download-link issuance (client).
//!
//! ## Modules
//!
//! - `app`: application state and router builder
//! - `config`: configuration management
//! - `error`: error handling and HTTP response mapping
//! - `models`: database models
//! - `routes`: API route handlers
//! - `storage`: on-disk blob store
//! - `download`: reversible download-link tokens

pub mod app;
pub mod config;
pub mod download;
pub mod error;
pub mod models;
pub mod routes;
pub mod storage;
