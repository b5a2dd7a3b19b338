use axum::extract::Path;
use axum::Extension;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::{ensure_occupant_access, ensure_property_access};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::communication_service::CommunicationService;
use crate::services::occupant_service::OccupantService;

use super::communication_view;

/// GET /api/communications/property/{property_id}
pub async fn property_communications(
    Extension(auth_user): Extension<AuthUser>,
    Path(property_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    ensure_property_access(&auth_user, property_id)?;

    let communications = CommunicationService::new()
        .await?
        .list_for_property(property_id)
        .await?;

    let communications: Vec<Value> = communications.iter().map(communication_view).collect();
    Ok(ApiResponse::success(json!({ "communications": communications })))
}

/// GET /api/communications/occupant/{occupant_id} - addressed to the
/// occupant's property
pub async fn occupant_communications(
    Extension(auth_user): Extension<AuthUser>,
    Path(occupant_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    ensure_occupant_access(&auth_user, occupant_id)?;

    let occupant = OccupantService::new()
        .await?
        .find_by_id(occupant_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Occupant not found"))?;

    let communications = CommunicationService::new()
        .await?
        .list_for_property(occupant.property_id)
        .await?;

    let communications: Vec<Value> = communications.iter().map(communication_view).collect();
    Ok(ApiResponse::success(json!({ "communications": communications })))
}
