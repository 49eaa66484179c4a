/// Error handling for the file-sharing API
///
/// This module provides a unified error type that maps to HTTP responses.
/// All handlers return `Result<T, ApiError>` which converts to the matching
/// HTTP status plus a human-readable message:
///
/// - validation failures (malformed fields, wrong file extension) → 400
/// - authentication failures (bad credentials, OTP mismatch) → 400/401
///   without detail
/// - role failures → 403
/// - missing user/file → 404
/// - collaborator failures → 500 with a generic body

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

/// Unified API error type
#[derive(Debug)]
pub enum ApiError {
    /// Bad request (400)
    BadRequest(String),

    /// Field-level validation errors (400)
    ValidationError(Vec<ValidationErrorDetail>),

    /// Unauthorized (401)
    Unauthorized(String),

    /// Forbidden (403) - caller holds the wrong role
    Forbidden(String),

    /// Not found (404)
    NotFound(String),

    /// Internal server error (500)
    InternalError(String),
}

/// Validation error detail
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationErrorDetail {
    /// Field that failed validation
    pub field: String,

    /// Error message
    pub message: String,
}

/// Error response format
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code (e.g., "bad_request", "forbidden")
    pub error: String,

    /// Human-readable error message
    pub message: String,

    /// Optional validation errors
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<ValidationErrorDetail>>,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            ApiError::ValidationError(errors) => {
                write!(f, "Validation failed: {} errors", errors.len())
            }
            ApiError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            ApiError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message, details) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg, None),
            ApiError::ValidationError(errors) => (
                StatusCode::BAD_REQUEST,
                "validation_error",
                "Request validation failed".to_string(),
                Some(errors),
            ),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "unauthorized", msg, None),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "forbidden", msg, None),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg, None),
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_code.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

/// Convert sqlx errors to API errors
///
/// Unique-constraint violations surface as field-level validation errors:
/// uniqueness of username/email is enforced by the store, but the signup
/// contract reports it as a 400 field error.
impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::NotFound("Resource not found".to_string()),
            sqlx::Error::Database(db_err) => {
                if let Some(constraint) = db_err.constraint() {
                    let field = if constraint.contains("email") {
                        "email"
                    } else if constraint.contains("username") {
                        "username"
                    } else {
                        ""
                    };
                    if !field.is_empty() {
                        return ApiError::ValidationError(vec![ValidationErrorDetail {
                            field: field.to_string(),
                            message: format!("A user with this {} already exists", field),
                        }]);
                    }
                    return ApiError::BadRequest(format!("Constraint violation: {}", constraint));
                }

                ApiError::InternalError(format!("Database error: {}", db_err))
            }
            _ => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

/// Convert password errors to API errors
impl From<workhub_shared::auth::password::PasswordError> for ApiError {
    fn from(err: workhub_shared::auth::password::PasswordError) -> Self {
        ApiError::InternalError(format!("Password operation failed: {}", err))
    }
}

/// Convert session token errors to API errors
impl From<workhub_shared::auth::session::SessionError> for ApiError {
    fn from(err: workhub_shared::auth::session::SessionError) -> Self {
        match err {
            workhub_shared::auth::session::SessionError::Expired => {
                ApiError::Unauthorized("Token expired".to_string())
            }
            _ => ApiError::Unauthorized("Invalid token".to_string()),
        }
    }
}

/// Convert role-check failures to API errors
impl From<workhub_shared::auth::authorization::AccessError> for ApiError {
    fn from(_: workhub_shared::auth::authorization::AccessError) -> Self {
        ApiError::Forbidden("Permission denied!".to_string())
    }
}

/// Convert mail delivery failures to API errors
impl From<workhub_shared::email::MailError> for ApiError {
    fn from(err: workhub_shared::email::MailError) -> Self {
        ApiError::InternalError(format!("Mail delivery failed: {}", err))
    }
}

/// Convert validator output to field-level API errors
impl From<validator::ValidationErrors> for ApiError {
    fn from(e: validator::ValidationErrors) -> Self {
        let errors: Vec<ValidationErrorDetail> = e
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| ValidationErrorDetail {
                    field: field.to_string(),
                    message: error
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| "Validation failed".to_string()),
                })
            })
            .collect();
        ApiError::ValidationError(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::BadRequest("Invalid input".to_string());
        assert_eq!(err.to_string(), "Bad request: Invalid input");

        let err = ApiError::NotFound("User not found!".to_string());
        assert_eq!(err.to_string(), "Not found: User not found!");
    }

    #[test]
    fn test_validation_error_display() {
        let errors = vec![
            ValidationErrorDetail {
                field: "email".to_string(),
                message: "Invalid email format".to_string(),
            },
            ValidationErrorDetail {
                field: "user_type".to_string(),
                message: "Must be ops or client".to_string(),
            },
        ];

        let err = ApiError::ValidationError(errors);
        assert_eq!(err.to_string(), "Validation failed: 2 errors");
    }

    #[test]
    fn test_status_mapping() {
        use axum::response::IntoResponse;

        let cases = vec![
            (
                ApiError::ValidationError(vec![]).into_response().status(),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError::Unauthorized("no".into()).into_response().status(),
                StatusCode::UNAUTHORIZED,
            ),
            (
                ApiError::Forbidden("no".into()).into_response().status(),
                StatusCode::FORBIDDEN,
            ),
            (
                ApiError::NotFound("no".into()).into_response().status(),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::InternalError("boom".into()).into_response().status(),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (actual, expected) in cases {
            assert_eq!(actual, expected);
        }
    }

    #[test]
    fn test_row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[test]
    fn test_access_error_maps_to_forbidden() {
        let access = workhub_shared::auth::authorization::require_role("client", "ops")
            .unwrap_err();
        let err: ApiError = access.into();
        assert!(matches!(err, ApiError::Forbidden(_)));
    }
}
