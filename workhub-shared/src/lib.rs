//! # WorkHub Shared Library
//!
//! This crate contains the plumbing shared by the WorkHub backends: the
//! file-sharing API (`workhub-fileshare`) and the task-manager API
//! (`workhub-taskboard`). The two services are unrelated systems with their
//! own data models; what they share is ambient infrastructure, not domain
//! types.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, session tokens, role gating
//! - `db`: database pool and migration helpers
//! - `email`: outbound email delivery
//! - `otp`: one-time verification codes

pub mod auth;
pub mod db;
pub mod email;
pub mod otp;

/// Current version of the WorkHub shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
