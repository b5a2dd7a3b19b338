use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use validator::Validate;

use crate::auth::{self, password, Claims};
use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::services::admin_service::AdminService;
use crate::services::occupant_service::OccupantService;
use crate::services::property_service::PropertyService;

#[derive(Debug, Deserialize, Validate)]
pub struct AdminLoginRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct OccupantLoginRequest {
    #[validate(length(min = 3, max = 10, message = "Invalid property code"))]
    pub property_code: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
}

/// POST /api/auth/admin/login
pub async fn admin_login(
    Json(payload): Json<AdminLoginRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    payload.validate()?;

    let admins = AdminService::new().await?;

    // Same response for unknown email and wrong password
    let admin = admins
        .find_active_by_email(&payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !password::verify_password(&payload.password, &admin.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::generate_jwt(&Claims::for_admin(&admin))?;

    tracing::info!(admin = %admin.email, "Admin login");

    Ok(ApiResponse::success(json!({
        "message": "Admin login successful",
        "token": token,
        "user": {
            "id": admin.id,
            "email": admin.email,
            "name": admin.name,
            "role": admin.role,
        }
    })))
}

/// POST /api/auth/occupant/login
pub async fn occupant_login(
    Json(payload): Json<OccupantLoginRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    payload.validate()?;

    let properties = PropertyService::new().await?;
    let occupants = OccupantService::new().await?;

    let property = properties
        .find_active_by_code(&payload.property_code)
        .await?
        .ok_or_else(|| ApiError::not_found("Property not found"))?;

    let occupant = occupants
        .find_for_login(property.id, &payload.email)
        .await?
        .ok_or_else(|| ApiError::unauthorized("Invalid credentials"))?;

    if !password::verify_password(&payload.password, &occupant.password_hash)? {
        return Err(ApiError::unauthorized("Invalid credentials"));
    }

    let token = auth::generate_jwt(&Claims::for_occupant(&occupant, &property))?;

    tracing::info!(occupant = %occupant.email, property = %property.property_code, "Occupant login");

    Ok(ApiResponse::success(json!({
        "message": "Occupant login successful",
        "token": token,
        "user": {
            "id": occupant.id,
            "email": occupant.email,
            "name": occupant.name,
            "property_id": occupant.property_id,
            "property_code": property.property_code,
            "property_type": property.property_type,
            "is_first_login": occupant.is_first_login,
        }
    })))
}
