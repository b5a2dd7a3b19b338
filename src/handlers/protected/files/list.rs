use axum::extract::Path;
use axum::Extension;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::{ensure_occupant_access, ensure_property_access};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::file_service::FileService;
use crate::services::occupant_service::OccupantService;

use super::file_view;

/// GET /api/files/property/{property_id} - active files for a property
pub async fn property_files(
    Extension(auth_user): Extension<AuthUser>,
    Path(property_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    ensure_property_access(&auth_user, property_id)?;

    let files = FileService::new()
        .await?
        .list_for_property(property_id)
        .await?;

    let files: Vec<Value> = files.iter().map(file_view).collect();
    Ok(ApiResponse::success(json!({ "files": files })))
}

/// GET /api/files/occupant/{occupant_id} - files that occupant uploaded
pub async fn occupant_files(
    Extension(auth_user): Extension<AuthUser>,
    Path(occupant_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    ensure_occupant_access(&auth_user, occupant_id)?;

    let occupant = OccupantService::new()
        .await?
        .find_by_id(occupant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Occupant not found"))?;

    let files = FileService::new()
        .await?
        .list_for_occupant(occupant.property_id, occupant_id)
        .await?;

    let files: Vec<Value> = files.iter().map(file_view).collect();
    Ok(ApiResponse::success(json!({ "files": files })))
}
