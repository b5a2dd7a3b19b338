use axum::extract::Path;
use axum::Extension;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::database::models::file_upload::UploaderRole;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::file_service::FileService;
use crate::services::storage;

/// DELETE /api/files/{file_id}
///
/// Admins delete anything; occupants only what they uploaded themselves.
pub async fn delete_file(
    Extension(auth_user): Extension<AuthUser>,
    Path(file_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    let files = FileService::new().await?;

    let file = files
        .find_by_id(file_id)
        .await?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    if auth_user.role == Role::Occupant
        && (file.uploaded_by != UploaderRole::Occupant || file.uploaded_by_id != auth_user.id)
    {
        return Err(ApiError::forbidden(
            "Permission denied. You can only delete your own files.",
        ));
    }

    storage::remove(&file.file_path).await;
    files.delete(file_id).await?;

    tracing::info!(%file_id, "Deleted file");

    Ok(ApiResponse::success(json!({
        "message": "File deleted successfully"
    })))
}
