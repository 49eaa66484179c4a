/// File endpoints
///
/// - `POST /upload-file/` - multipart upload, ops role only
/// - `GET /download-file/{file_id}/` - link issuance, client role only
///
/// Both gates go through the shared `require_role` check; the role comparison
/// is not re-implemented per handler.

use crate::{
    app::{AppState, Caller},
    error::{ApiError, ApiResult, ValidationErrorDetail},
    models::file::{CreateUploadedFile, UploadedFile},
    models::user::UserType,
    storage,
};
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use workhub_shared::auth::authorization::require_role;

/// Upload response
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Human-readable outcome
    pub message: String,

    /// ID of the stored file
    pub file_id: Uuid,
}

/// Download-link response
///
/// The link embeds a reversible token; content serving is out of scope for
/// this endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct DownloadLinkResponse {
    /// Synthetic URL embedding the token
    #[serde(rename = "download-link")]
    pub download_link: String,

    /// Human-readable outcome
    pub message: String,
}

/// Upload endpoint
///
/// ```text
/// POST /upload-file/
/// Content-Type: multipart/form-data  (field name: "file")
/// ```
///
/// The extension allow-list ({pptx, docx, xlsx}) is checked before the blob
/// is written, so a rejected upload persists nothing.
///
/// # Errors
///
/// - `403 Forbidden`: caller role is not ops
/// - `400 Bad Request`: missing file field or disallowed extension
pub async fn upload_file(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    mut multipart: Multipart,
) -> ApiResult<(StatusCode, Json<UploadResponse>)> {
    require_role(caller.role, UserType::Ops)?;

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        match field.name().unwrap_or("") {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(|n| n.to_string())
                    .ok_or_else(|| ApiError::BadRequest("File field has no filename".to_string()))?;
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                upload = Some((file_name, bytes.to_vec()));
            }
            other => {
                tracing::warn!(field = other, "Unexpected form field on upload");
            }
        }
    }

    let (file_name, contents) = upload
        .ok_or_else(|| {
            ApiError::ValidationError(vec![ValidationErrorDetail {
                field: "file".to_string(),
                message: "No file provided".to_string(),
            }])
        })?;

    let extension = storage::allowed_extension(&file_name).ok_or_else(|| {
        ApiError::ValidationError(vec![ValidationErrorDetail {
            field: "file".to_string(),
            message: "Invalid file type. Allowed: pptx, docx, xlsx".to_string(),
        }])
    })?;

    let stored_path = state
        .store
        .save(&extension, &contents)
        .await
        .map_err(|e| ApiError::InternalError(format!("Blob store failure: {}", e)))?;

    let file = UploadedFile::create(
        &state.db,
        CreateUploadedFile {
            user_id: caller.user_id,
            file_name,
            stored_path,
        },
    )
    .await?;

    tracing::info!(file_id = %file.id, user_id = %caller.user_id, "File uploaded");

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            message: "File uploaded successfully!".to_string(),
            file_id: file.id,
        }),
    ))
}

/// Download-link endpoint
///
/// ```text
/// GET /download-file/{file_id}/
/// ```
///
/// Responds with a synthetic URL embedding a reversible token for the file
/// id. Tokens are deterministic per file id for one process-lifetime key.
///
/// # Errors
///
/// - `403 Forbidden`: caller role is not client
/// - `404 Not Found`: no file with that id
pub async fn download_file(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(file_id): Path<Uuid>,
) -> ApiResult<Json<DownloadLinkResponse>> {
    require_role(caller.role, UserType::Client)?;

    let file = UploadedFile::find_by_id(&state.db, file_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("File not found!".to_string()))?;

    let download_link = state
        .links
        .link_for(file.id)
        .map_err(|e| ApiError::InternalError(format!("Token minting failed: {}", e)))?;

    Ok(Json(DownloadLinkResponse {
        download_link,
        message: "success".to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_download_link_field_name() {
        let response = DownloadLinkResponse {
            download_link: "/download-file/abc".to_string(),
            message: "success".to_string(),
        };

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["download-link"], "/download-file/abc");
        assert_eq!(json["message"], "success");
    }

    #[test]
    fn test_role_gates() {
        // ops may upload, client may download, never the other way around
        assert!(require_role(UserType::Ops, UserType::Ops).is_ok());
        assert!(require_role(UserType::Client, UserType::Ops).is_err());
        assert!(require_role(UserType::Client, UserType::Client).is_ok());
        assert!(require_role(UserType::Ops, UserType::Client).is_err());
    }
}
