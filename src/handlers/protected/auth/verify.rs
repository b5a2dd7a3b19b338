use axum::Extension;
use serde_json::{json, Value};

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::admin_service::AdminService;
use crate::services::occupant_service::OccupantService;

/// GET /api/auth/verify
///
/// Re-reads the account from the database so the client sees fresh profile
/// data, not whatever the token was minted with.
pub async fn verify_token(
    Extension(auth_user): Extension<AuthUser>,
) -> Result<ApiResponse<Value>, ApiError> {
    let user = match auth_user.role {
        Role::Occupant => {
            let (occupant, property) = OccupantService::new()
                .await?
                .find_with_property(auth_user.id)
                .await?
                .ok_or_else(|| ApiError::not_found("User not found"))?;

            json!({
                "id": occupant.id,
                "email": occupant.email,
                "name": occupant.name,
                "role": Role::Occupant,
                "property_id": occupant.property_id,
                "property_code": property.property_code,
                "property_type": property.property_type,
                "is_first_login": occupant.is_first_login,
            })
        }
        Role::Admin => {
            let admin = AdminService::new()
                .await?
                .find_by_id(auth_user.id)
                .await?
                .ok_or_else(|| ApiError::not_found("User not found"))?;

            json!({
                "id": admin.id,
                "email": admin.email,
                "name": admin.name,
                "role": admin.role,
            })
        }
    };

    Ok(ApiResponse::success(json!({
        "valid": true,
        "user": user,
    })))
}
