use axum::extract::Path;
use axum::Extension;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::handlers::ensure_property_access;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::communication_service::CommunicationService;
use crate::services::storage;

/// PATCH /api/communications/{id}/read
pub async fn mark_read(
    Extension(auth_user): Extension<AuthUser>,
    Path(communication_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    let communications = CommunicationService::new().await?;

    let communication = communications
        .find_by_id(communication_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Communication not found"))?;

    ensure_property_access(&auth_user, communication.recipient_property_id)?;

    communications.mark_read(communication_id).await?;

    Ok(ApiResponse::success(json!({
        "message": "Communication marked as read"
    })))
}

/// DELETE /api/communications/{id} - admin only
pub async fn delete_communication(
    Extension(auth_user): Extension<AuthUser>,
    Path(communication_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    if auth_user.role != Role::Admin {
        return Err(ApiError::forbidden("Access denied"));
    }

    let communications = CommunicationService::new().await?;

    let communication = communications
        .find_by_id(communication_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Communication not found"))?;

    if let Some(file_path) = &communication.file_path {
        storage::remove(file_path).await;
    }

    communications.delete(communication_id).await?;

    tracing::info!(%communication_id, "Deleted communication");

    Ok(ApiResponse::success(json!({
        "message": "Communication deleted successfully"
    })))
}
