use axum::Extension;
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::property_service::PropertyService;

fn own_property_id(auth_user: &AuthUser) -> Result<uuid::Uuid, ApiError> {
    auth_user
        .property_id
        .ok_or_else(|| ApiError::forbidden("No property associated with this account"))
}

/// GET /api/occupant/dashboard - summary of the occupant's property
pub async fn dashboard(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<ApiResponse<Value>, ApiError> {
    let property_id = own_property_id(&auth_user)?;

    let property = PropertyService::new().await?.find_by_id(property_id).await?;

    let summary = property.map(|p| {
        json!({
            "property_code": p.property_code,
            "property_type": p.property_type,
            "status": p.status,
        })
    });

    Ok(ApiResponse::success(json!({ "property": summary })))
}

/// GET /api/occupant/property - the full property record
pub async fn property_info(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<ApiResponse<Value>, ApiError> {
    let property_id = own_property_id(&auth_user)?;

    let property = PropertyService::new()
        .await?
        .find_by_id(property_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    Ok(ApiResponse::success(json!({ "property": property })))
}
