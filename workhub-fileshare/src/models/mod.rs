/// Database models for the file-sharing service
///
/// # Models
///
/// - `user`: user accounts with an ops/client role
/// - `otp`: one-to-one email verification records for client users
/// - `file`: uploaded file records owned by an ops user

pub mod file;
pub mod otp;
pub mod user;
