use axum::extract::Path;
use axum::http::HeaderMap;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::config;
use crate::database::models::admin_user::{AdminRole, AdminUser};
use crate::database::models::RecordStatus;
use crate::error::ApiError;
use crate::middleware::auth::admin_from_headers;
use crate::middleware::response::ApiResponse;
use crate::services::admin_service::AdminService;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateAdminRequest {
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    pub role: Option<AdminRole>,
    pub system_token: Option<String>,
}

/// POST /api/admin/admins - create an admin account
///
/// Bootstrap rule: the very first admin is created with the configured
/// system token; every later creation needs an existing admin's JWT. The
/// route therefore sits outside the admin middleware stack.
pub async fn create_admin(
    headers: HeaderMap,
    Json(payload): Json<CreateAdminRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    payload.validate()?;

    let admins = AdminService::new().await?;

    if admins.count().await? == 0 {
        let expected = config::config()
            .security
            .system_token
            .as_deref()
            .ok_or_else(|| ApiError::forbidden("System token not configured"))?;

        match payload.system_token.as_deref() {
            None => {
                return Err(ApiError::unauthorized(
                    "System token is required for initial admin creation",
                ))
            }
            Some(token) if token != expected => {
                return Err(ApiError::forbidden("Invalid system token"))
            }
            Some(_) => {}
        }
    } else {
        admin_from_headers(&headers)?;
    }

    let admin = admins
        .create(
            &payload.email,
            &payload.password,
            &payload.name,
            payload.role.unwrap_or(AdminRole::Admin),
        )
        .await?;

    tracing::info!(admin = %admin.email, "Created admin account");

    Ok(ApiResponse::created(json!({
        "message": "Admin account created successfully",
        "admin": admin_view(&admin),
    })))
}

/// GET /api/admin/admins - newest first, no password hashes
pub async fn list_admins(headers: HeaderMap) -> Result<ApiResponse<Value>, ApiError> {
    admin_from_headers(&headers)?;

    let admins = AdminService::new().await?.list().await?;
    let admins: Vec<Value> = admins.iter().map(admin_view).collect();

    Ok(ApiResponse::success(json!({ "admins": admins })))
}

#[derive(Debug, Deserialize)]
pub struct UpdateAdminStatusRequest {
    pub status: RecordStatus,
}

/// PUT /api/admin/admins/{admin_id}/status
pub async fn update_admin_status(
    headers: HeaderMap,
    Path(admin_id): Path<Uuid>,
    Json(payload): Json<UpdateAdminStatusRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    admin_from_headers(&headers)?;

    AdminService::new()
        .await?
        .set_status(admin_id, payload.status)
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "Admin status updated successfully"
    })))
}

fn admin_view(admin: &AdminUser) -> Value {
    json!({
        "id": admin.id,
        "email": admin.email,
        "name": admin.name,
        "role": admin.role,
        "status": admin.status,
        "created_at": admin.created_at,
    })
}
