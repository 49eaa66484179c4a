/// Authentication endpoints
///
/// - `POST /auth/register/` - create an account
/// - `POST /auth/login/` - credential check, returns a bearer token

use crate::{
    app::{AppState, MEMBER_ROLE, TOKEN_ISSUER},
    error::{ApiError, ApiResult},
    models::user::{CreateUser, User},
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use validator::Validate;
use workhub_shared::auth::{password, session};

/// Registration request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    /// Login name
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Optional mobile number
    #[validate(length(min = 7, max = 15, message = "Mobile must be 7-15 characters"))]
    pub mobile: Option<String>,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
}

/// Message-only response used by the registration endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name
    pub username: String,

    /// Password
    pub password: String,
}

/// Login response
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    /// Human-readable outcome
    pub message: String,

    /// Bearer token for the task endpoints
    pub access_token: String,
}

/// Registration endpoint
///
/// ```text
/// POST /auth/register/
/// {"username": "alice", "email": "alice@x.com", "mobile": "5551234567", "password": "..."}
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: field validation failed, or duplicate username/mobile
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            mobile: req.mobile,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = %user.id, "Registration complete");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully!".to_string(),
        }),
    ))
}

/// Login endpoint
///
/// ```text
/// POST /auth/login/
/// {"username": "alice", "password": "..."}
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: invalid credentials (no detail on which part)
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let user = User::find_by_username(&state.db, &req.username)
        .await?
        .ok_or_else(|| ApiError::Unauthorized("Invalid credentials!".to_string()))?;

    let valid = password::verify_password(&req.password, &user.password_hash)?;
    if !valid {
        return Err(ApiError::Unauthorized("Invalid credentials!".to_string()));
    }

    let claims = session::Claims::new(user.id, MEMBER_ROLE, TOKEN_ISSUER);
    let access_token = session::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        access_token,
    }))
}
