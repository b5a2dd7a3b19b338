use crate::error::ApiError;
use crate::middleware::response::ApiResponse;
use crate::services::property_service::{DashboardSummary, PropertyService};

/// GET /api/admin/dashboard - portal overview counts
pub async fn dashboard() -> Result<ApiResponse<DashboardSummary>, ApiError> {
    let summary = PropertyService::new().await?.dashboard().await?;
    Ok(ApiResponse::success(summary))
}
