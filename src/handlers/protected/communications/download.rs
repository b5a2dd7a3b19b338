use axum::extract::Path;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::ensure_property_access;
use crate::middleware::auth::AuthUser;
use crate::services::communication_service::CommunicationService;
use crate::services::storage;

/// GET /api/communications/download/{id} - fetch the PDF attachment
pub async fn download_communication(
    Extension(auth_user): Extension<AuthUser>,
    Path(communication_id): Path<Uuid>,
) -> Result<impl IntoResponse, ApiError> {
    let communication = CommunicationService::new()
        .await?
        .find_by_id(communication_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Communication not found"))?;

    ensure_property_access(&auth_user, communication.recipient_property_id)?;

    let (Some(file_path), Some(file_name)) = (&communication.file_path, &communication.file_name)
    else {
        return Err(ApiError::not_found(
            "No file attached to this communication",
        ));
    };

    let bytes = storage::read(file_path).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", file_name),
            ),
        ],
        bytes,
    ))
}
