/// Email verification records
///
/// One record per client user, created at signup with a freshly generated
/// 6-digit code. The record is mutated exactly once: a successful
/// verification flips `is_verified`. The code never expires and is never
/// regenerated.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE otp_verifications (
///     user_id UUID PRIMARY KEY REFERENCES users(id) ON DELETE CASCADE,
///     otp CHAR(6) NOT NULL,
///     is_verified BOOLEAN NOT NULL DEFAULT FALSE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Pending or completed email verification for one user
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OtpVerification {
    /// Owning user (one-to-one)
    pub user_id: Uuid,

    /// 6-digit numeric code sent by email
    pub otp: String,

    /// Whether verification has completed
    pub is_verified: bool,

    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl OtpVerification {
    /// Creates an unverified record for a user
    pub async fn create(pool: &PgPool, user_id: Uuid, otp: &str) -> Result<Self, sqlx::Error> {
        let record = sqlx::query_as::<_, OtpVerification>(
            r#"
            INSERT INTO otp_verifications (user_id, otp)
            VALUES ($1, $2)
            RETURNING user_id, otp, is_verified, created_at
            "#,
        )
        .bind(user_id)
        .bind(otp)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Loads the record for a user
    pub async fn find_by_user(pool: &PgPool, user_id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let record = sqlx::query_as::<_, OtpVerification>(
            r#"
            SELECT user_id, otp, is_verified, created_at
            FROM otp_verifications
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Marks a user's verification as completed
    ///
    /// Returns true if a record was updated
    pub async fn mark_verified(pool: &PgPool, user_id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE otp_verifications
            SET is_verified = TRUE
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Compares the stored code against a supplied code
    ///
    /// The stored column is CHAR(6); trailing padding is trimmed before the
    /// comparison so a correct code never fails on whitespace.
    pub fn matches(&self, supplied: &str) -> bool {
        self.otp.trim_end() == supplied
    }
}
