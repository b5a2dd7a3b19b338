use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::ensure_property_access;
use crate::middleware::auth::AuthUser;
use crate::services::file_service::FileService;
use crate::services::storage;

/// GET /api/files/download/{file_id} - send the PDF as an attachment
pub async fn download_file(
    Extension(auth_user): Extension<AuthUser>,
    Path(file_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let file = FileService::new()
        .await?
        .find_by_id(file_id)
        .await?
        .ok_or_else(|| ApiError::not_found("File not found"))?;

    ensure_property_access(&auth_user, file.property_id)?;

    let bytes = storage::read(&file.file_path).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file.file_name),
            ),
        ],
        bytes,
    ))
}
