/// Session token generation and validation
///
/// Both services issue HS256-signed bearer tokens at login. A token carries
/// the user id and a role string; the fileshare service maps the role onto
/// its ops/client gate, the taskboard service only cares that a valid caller
/// exists.
///
/// # Security
///
/// - **Algorithm**: HS256 (HMAC with SHA-256)
/// - **Expiration**: 24 hours by default
/// - **Validation**: signature, expiration and issuer checks
/// - **Secret Management**: secrets must be at least 32 bytes
///
/// # Example
///
/// ```
/// use workhub_shared::auth::session::{create_token, validate_token, Claims};
/// use uuid::Uuid;
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let user_id = Uuid::new_v4();
/// let claims = Claims::new(user_id, "client", "fileshare");
/// let token = create_token(&claims, "secret-key-at-least-32-bytes-long!!")?;
///
/// let validated = validate_token(&token, "secret-key-at-least-32-bytes-long!!", "fileshare")?;
/// assert_eq!(validated.sub, user_id);
/// assert_eq!(validated.role, "client");
/// # Ok(())
/// # }
/// ```

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error type for session token operations
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// Failed to create token
    #[error("Failed to create token: {0}")]
    CreateError(String),

    /// Failed to validate token
    #[error("Failed to validate token: {0}")]
    ValidationError(String),

    /// Token has expired
    #[error("Token has expired")]
    Expired,

    /// Invalid issuer
    #[error("Invalid issuer: expected {expected}")]
    InvalidIssuer { expected: String },
}

/// Session token claims
///
/// # Standard Claims
///
/// - `sub`: Subject (user ID)
/// - `iss`: Issuer (the service that minted the token)
/// - `iat`: Issued at timestamp
/// - `exp`: Expiration timestamp
///
/// # Custom Claims
///
/// - `role`: caller role string, e.g. "ops" or "client"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject - user ID
    pub sub: Uuid,

    /// Issuer - the minting service
    pub iss: String,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration time (Unix timestamp)
    pub exp: i64,

    /// Caller role (custom claim)
    pub role: String,
}

impl Claims {
    /// Default session lifetime
    pub const DEFAULT_TTL_HOURS: i64 = 24;

    /// Creates new claims with the default 24h expiration
    pub fn new(user_id: Uuid, role: &str, issuer: &str) -> Self {
        Self::with_expiration(user_id, role, issuer, Duration::hours(Self::DEFAULT_TTL_HOURS))
    }

    /// Creates claims with a custom expiration
    pub fn with_expiration(user_id: Uuid, role: &str, issuer: &str, expires_in: Duration) -> Self {
        let now = Utc::now();

        Self {
            sub: user_id,
            iss: issuer.to_string(),
            iat: now.timestamp(),
            exp: (now + expires_in).timestamp(),
            role: role.to_string(),
        }
    }
}

/// Creates a signed session token from claims
///
/// # Errors
///
/// Returns `SessionError::CreateError` if encoding fails
pub fn create_token(claims: &Claims, secret: &str) -> Result<String, SessionError> {
    let header = Header::new(Algorithm::HS256);
    let key = EncodingKey::from_secret(secret.as_bytes());

    encode(&header, claims, &key)
        .map_err(|e| SessionError::CreateError(format!("Token encoding failed: {}", e)))
}

/// Validates a session token and extracts claims
///
/// Verifies the signature, the expiration and that the issuer matches the
/// service doing the validation. A fileshare token is not accepted by the
/// taskboard service and vice versa.
///
/// # Errors
///
/// Returns an error if the signature is invalid, the token has expired or
/// the issuer doesn't match.
pub fn validate_token(token: &str, secret: &str, issuer: &str) -> Result<Claims, SessionError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[issuer]);
    validation.validate_exp = true;

    let token_data = decode::<Claims>(token, &key, &validation).map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::Expired,
        jsonwebtoken::errors::ErrorKind::InvalidIssuer => SessionError::InvalidIssuer {
            expected: issuer.to_string(),
        },
        _ => SessionError::ValidationError(format!("Token validation failed: {}", e)),
    })?;

    Ok(token_data.claims)
}
