/// Account endpoints
///
/// - `POST /signup/` - create an account; client users get an OTP by email
/// - `POST /verify-email/` - match the OTP and flip the verified flag
/// - `POST /login/` - credential check, returns a bearer token

use crate::{
    app::{AppState, TOKEN_ISSUER},
    error::{ApiError, ApiResult, ValidationErrorDetail},
    models::{
        otp::OtpVerification,
        user::{CreateUser, User, UserType},
    },
};
use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use validator::Validate;
use workhub_shared::{
    auth::{password, session},
    email::OutboundEmail,
    otp::generate_otp,
};

/// Signup request
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    /// Login name
    #[validate(length(min = 1, max = 150, message = "Username must be 1-150 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Requested role; must be "ops" or "client"
    pub user_type: String,
}

/// Message-only response used by the account endpoints
#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Human-readable outcome
    pub message: String,
}

/// Verify-email request
#[derive(Debug, Deserialize)]
pub struct VerifyEmailRequest {
    /// Address the OTP was mailed to
    pub email: String,

    /// Supplied 6-digit code
    pub otp: String,
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

    /// Bearer token for the role-gated file endpoints
    pub access_token: String,
}

/// Builds the verification mail for a fresh signup
fn verification_email(to: &str, otp: &str) -> OutboundEmail {
    OutboundEmail {
        to: to.to_string(),
        subject: "Verify Your Email".to_string(),
        body: format!("Your OTP is: {}", otp),
    }
}

/// Signup endpoint
///
/// ```text
/// POST /signup/
/// {"username": "alice", "email": "alice@x.com", "password": "...", "user_type": "client"}
/// ```
///
/// Creates the user with a hashed password. Client signups additionally get
/// an unverified OTP record and exactly one verification mail; ops signups
/// get neither.
///
/// # Errors
///
/// - `400 Bad Request`: field validation failed, unknown user_type, or
///   duplicate username/email
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    req.validate()?;

    let user_type = UserType::from_str(&req.user_type).map_err(|msg| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "user_type".to_string(),
            message: msg,
        }])
    })?;

    let password_hash = password::hash_password(&req.password)?;

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
            password_hash,
            user_type,
        },
    )
    .await?;

    // Client users must verify their address before anything else; ops users
    // skip the OTP flow entirely.
    if user.user_type == UserType::Client {
        let otp = generate_otp();
        OtpVerification::create(&state.db, user.id, &otp).await?;
        state
            .mailer
            .send(&verification_email(&user.email, &otp))
            .await?;

        tracing::info!(user_id = %user.id, "Client signup complete, verification mail sent");
    } else {
        tracing::info!(user_id = %user.id, "Ops signup complete");
    }

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User created successfully!".to_string(),
        }),
    ))
}

/// Verify-email endpoint
///
/// ```text
/// POST /verify-email/
/// {"email": "alice@x.com", "otp": "123456"}
/// ```
///
/// Succeeds iff the stored OTP equals the supplied OTP for an existing user.
/// A mismatch never mutates the verified flag and the response does not say
/// which side was wrong.
///
/// # Errors
///
/// - `400 Bad Request`: OTP mismatch
/// - `404 Not Found`: no user with that email, or no OTP record for the user
pub async fn verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let user = User::find_by_email(&state.db, &req.email)
        .await?
        .ok_or_else(|| ApiError::NotFound("User not found!".to_string()))?;

    let record = OtpVerification::find_by_user(&state.db, user.id)
        .await?
        .ok_or_else(|| ApiError::NotFound("No verification pending for this user".to_string()))?;

    if !record.matches(&req.otp) {
        return Err(ApiError::BadRequest("Invalid OTP!".to_string()));
    }

    OtpVerification::mark_verified(&state.db, user.id).await?;

    tracing::info!(user_id = %user.id, "Email verified");

    Ok(Json(MessageResponse {
        message: "Email verified successfully!".to_string(),
    }))
}

/// Login endpoint
///
/// ```text
/// POST /login/
/// {"username": "alice", "password": "..."}
/// ```
///
/// Checks credentials and returns a bearer token carrying the user's role
/// for the file endpoints.
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

    let claims = session::Claims::new(user.id, user.user_type.as_str(), TOKEN_ISSUER);
    let access_token = session::create_token(&claims, state.jwt_secret())?;

    tracing::info!(user_id = %user.id, "Login successful");

    Ok(Json(LoginResponse {
        message: "Login successful!".to_string(),
        access_token,
    }))
}
