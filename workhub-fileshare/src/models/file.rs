/// Uploaded file records
///
/// Every uploaded blob belongs to exactly one user (the uploading ops user).
/// The record stores the original name and the on-disk blob reference. There
/// is no versioning and no deletion.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE uploaded_files (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     user_id UUID NOT NULL REFERENCES users(id) ON DELETE CASCADE,
///     file_name VARCHAR(255) NOT NULL,
///     stored_path VARCHAR(512) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

/// Record of one uploaded file
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct UploadedFile {
    /// Unique file ID
    pub id: Uuid,

    /// Owning (uploading) user
    pub user_id: Uuid,

    /// Original client-supplied file name
    pub file_name: String,

    /// Blob reference inside the upload directory
    pub stored_path: String,

    /// When the file was uploaded
    pub created_at: DateTime<Utc>,
}

/// Input for recording a new upload
#[derive(Debug, Clone)]
pub struct CreateUploadedFile {
    /// Owning user
    pub user_id: Uuid,

    /// Original file name
    pub file_name: String,

    /// Blob reference returned by the store
    pub stored_path: String,
}

impl UploadedFile {
    /// Records an uploaded file
    pub async fn create(pool: &PgPool, data: CreateUploadedFile) -> Result<Self, sqlx::Error> {
        let file = sqlx::query_as::<_, UploadedFile>(
            r#"
            INSERT INTO uploaded_files (user_id, file_name, stored_path)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, file_name, stored_path, created_at
            "#,
        )
        .bind(data.user_id)
        .bind(data.file_name)
        .bind(data.stored_path)
        .fetch_one(pool)
        .await?;

        Ok(file)
    }

    /// Finds a file by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let file = sqlx::query_as::<_, UploadedFile>(
            r#"
            SELECT id, user_id, file_name, stored_path, created_at
            FROM uploaded_files
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(file)
    }
}
