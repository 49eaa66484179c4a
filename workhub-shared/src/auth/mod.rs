/// Authentication and authorization utilities
///
/// This module provides the authentication primitives used by both WorkHub
/// services:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and validation
/// - [`session`]: HS256 bearer token generation and validation
/// - [`authorization`]: the single role-gate used by every role-checked
///   endpoint
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **Session Tokens**: HS256 signing with configurable expiration
/// - **Constant-time Comparison**: password verification uses constant-time
///   operations
///
/// # Example
///
/// ```no_run
/// use workhub_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("user_password")?;
/// assert!(verify_password("user_password", &hash)?);
/// # Ok(())
/// # }
/// ```

pub mod authorization;
pub mod password;
pub mod session;
