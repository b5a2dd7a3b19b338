use axum::extract::Multipart;
use axum::Extension;
use serde_json::{json, Value};

use crate::auth::Role;
use crate::database::models::file_upload::UploaderRole;
use crate::error::ApiError;
use crate::handlers::{ensure_property_access, read_multipart};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::file_service::{FileService, NewFileUpload};
use crate::services::storage;

use super::file_view;

/// POST /api/files/upload - multipart PDF upload
///
/// Uploader identity comes from the JWT, never from the form.
pub async fn upload_file(
    Extension(auth_user): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<ApiResponse<Value>, ApiError> {
    let form = read_multipart(multipart).await?;

    let property_id = form.uuid("property_id")?;
    let file_title = form.required_text("file_title")?.to_string();
    let description = form
        .text("description")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let part = form
        .file
        .as_ref()
        .ok_or_else(|| ApiError::bad_request("No file uploaded"))?;

    ensure_property_access(&auth_user, property_id)?;

    storage::validate_upload(part.content_type.as_deref(), part.bytes.len())?;

    let uploaded_by = match auth_user.role {
        Role::Admin => UploaderRole::Admin,
        Role::Occupant => UploaderRole::Occupant,
    };

    let stored = storage::store(&part.file_name, &part.bytes).await?;

    let file = FileService::new()
        .await?
        .create(
            NewFileUpload {
                property_id,
                uploaded_by,
                uploaded_by_id: auth_user.id,
                file_title,
                description,
            },
            stored,
        )
        .await?;

    tracing::info!(file = %file.file_name, %property_id, "Stored uploaded file");

    Ok(ApiResponse::created(json!({
        "message": "File uploaded successfully",
        "file_upload": file_view(&file),
    })))
}
