use axum::{Extension, Json};
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::{self, Claims, Role};
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::admin_service::AdminService;
use crate::services::occupant_service::OccupantService;

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub new_password: String,
    pub confirm_password: String,
}

/// POST /api/auth/change-password
///
/// Works for both roles. Occupants additionally get their first-login flag
/// cleared and a fresh token carrying the updated claim, so the client can
/// leave the forced password-change screen.
pub async fn change_password(
    Extension(auth_user): Extension<AuthUser>,
    Json(payload): Json<ChangePasswordRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    payload.validate()?;

    if payload.new_password != payload.confirm_password {
        return Err(ApiError::validation_error(
            "Password confirmation does not match password",
            None,
        ));
    }

    match auth_user.role {
        Role::Occupant => {
            let occupants = OccupantService::new().await?;
            occupants
                .change_password(auth_user.id, &payload.new_password)
                .await?;

            let (occupant, property) = occupants
                .find_with_property(auth_user.id)
                .await?
                .ok_or_else(|| ApiError::not_found("Occupant not found"))?;

            let token = auth::generate_jwt(&Claims::for_occupant(&occupant, &property))?;

            Ok(ApiResponse::success(json!({
                "message": "Password changed successfully",
                "token": token,
                "user": {
                    "id": occupant.id,
                    "email": occupant.email,
                    "name": occupant.name,
                    "role": Role::Occupant,
                    "property_id": occupant.property_id,
                    "property_code": property.property_code,
                    "property_type": property.property_type,
                    "is_first_login": occupant.is_first_login,
                }
            })))
        }
        Role::Admin => {
            let admins = AdminService::new().await?;
            admins
                .update_password(auth_user.id, &payload.new_password)
                .await?;

            Ok(ApiResponse::success(json!({
                "message": "Password changed successfully"
            })))
        }
    }
}
