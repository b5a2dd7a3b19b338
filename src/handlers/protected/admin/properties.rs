use axum::extract::{Path, Query};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use uuid::Uuid;
use validator::Validate;

use crate::database::models::property::PropertyType;
use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::services::property_service::{
    NewProperty, OccupantUpdate, PropertiesPage, PropertyService,
};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// GET /api/admin/properties/type/{ptype} - paginated listing with occupants
pub async fn list_properties_by_type(
    Path(property_type): Path<PropertyType>,
    Query(query): Query<ListQuery>,
) -> Result<ApiResponse<PropertiesPage>, ApiError> {
    let page = PropertyService::new()
        .await?
        .list_by_type(
            property_type,
            query.page.unwrap_or(1),
            query.limit.unwrap_or(10),
        )
        .await?;

    Ok(ApiResponse::success(page))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    pub property_type: PropertyType,
    #[validate(length(min = 3, max = 10, message = "Property code must be 3-10 characters"))]
    pub property_code: String,
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub occupant_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub occupant_email: String,
    #[validate(length(min = 10, max = 15, message = "Contact must be 10-15 digits"))]
    pub occupant_contact: Option<String>,
    pub start_date: NaiveDate,
}

/// POST /api/admin/properties - create a property and its first occupant
pub async fn create_property(
    Json(payload): Json<CreatePropertyRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    payload.validate()?;

    let (property, occupant, temp_password) = PropertyService::new()
        .await?
        .create_with_occupant(NewProperty {
            property_type: payload.property_type,
            property_code: payload.property_code,
            occupant_name: payload.occupant_name,
            occupant_email: payload.occupant_email,
            occupant_contact: payload.occupant_contact,
            start_date: payload.start_date,
        })
        .await?;

    tracing::info!(code = %property.property_code, "Created property with occupant");

    Ok(ApiResponse::created(json!({
        "message": "Property and occupant created successfully",
        "property": {
            "id": property.id,
            "property_code": property.property_code,
            "property_type": property.property_type,
        },
        "occupant": {
            "id": occupant.id,
            "name": occupant.name,
            "email": occupant.email,
        },
        "temp_password": temp_password,
    })))
}

/// GET /api/admin/properties/{property_id} - property with active occupants
pub async fn property_details(
    Path(property_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    let (property, occupants) = PropertyService::new().await?.details(property_id).await?;

    Ok(ApiResponse::success(json!({
        "property": property,
        "occupants": occupants,
    })))
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOccupantRequest {
    #[validate(length(min = 2, max = 100, message = "Name must be 2-100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, max = 15, message = "Contact must be 10-15 digits"))]
    pub contact: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

/// PUT /api/admin/properties/{property_id}/occupant
pub async fn update_occupant(
    Path(property_id): Path<Uuid>,
    Json(payload): Json<UpdateOccupantRequest>,
) -> Result<ApiResponse<Value>, ApiError> {
    payload.validate()?;

    PropertyService::new()
        .await?
        .update_occupant(
            property_id,
            OccupantUpdate {
                name: payload.name,
                email: payload.email,
                contact: payload.contact,
                start_date: payload.start_date,
                end_date: payload.end_date,
            },
        )
        .await?;

    Ok(ApiResponse::success(json!({
        "message": "Occupant details updated successfully"
    })))
}

/// POST /api/admin/properties/{property_id}/reset-password
///
/// Puts the occupant back on the default password and forces a change on
/// next login.
pub async fn reset_occupant_password(
    Path(property_id): Path<Uuid>,
) -> Result<ApiResponse<Value>, ApiError> {
    let temp_password = PropertyService::new()
        .await?
        .reset_password_to_default(property_id)
        .await?;

    tracing::info!(%property_id, "Occupant password reset to default");

    Ok(ApiResponse::success(json!({
        "message": "Password reset to default successfully",
        "temp_password": temp_password,
    })))
}
