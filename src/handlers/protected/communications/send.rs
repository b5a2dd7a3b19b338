use axum::extract::Multipart;
use axum::Extension;
use serde_json::{json, Value};

use crate::database::models::communication::RecipientType;
use crate::error::ApiError;
use crate::handlers::{read_multipart, MultipartForm};
use crate::middleware::auth::AuthUser;
use crate::middleware::response::ApiResponse;
use crate::services::communication_service::{CommunicationService, NewCommunication};
use crate::services::storage::{self, StoredFile};

use super::communication_view;

/// Validate and store the optional PDF attachment of a communication
async fn stored_attachment(form: &MultipartForm) -> Result<Option<StoredFile>, ApiError> {
    let Some(part) = form.file.as_ref() else {
        return Ok(None);
    };

    storage::validate_upload(part.content_type.as_deref(), part.bytes.len())?;
    let stored = storage::store(&part.file_name, &part.bytes).await?;
    Ok(Some(stored))
}

/// POST /api/communications/individual - send to one property
pub async fn send_individual(
    Extension(auth_user): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<ApiResponse<Value>, ApiError> {
    let form = read_multipart(multipart).await?;

    let property_id = form.uuid("property_id")?;
    let file_title = form.required_text("file_title")?.to_string();
    let message = form
        .text("message")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let attachment = stored_attachment(&form).await?;

    let communication = CommunicationService::new()
        .await?
        .send_individual(
            NewCommunication {
                sender_id: auth_user.id,
                file_title,
                message,
                attachment,
            },
            property_id,
        )
        .await?;

    tracing::info!(%property_id, "Sent individual communication");

    Ok(ApiResponse::created(json!({
        "message": "Communication sent successfully",
        "communication": communication_view(&communication),
    })))
}

/// POST /api/communications/bulk - fan out to a property class
pub async fn send_bulk(
    Extension(auth_user): Extension<AuthUser>,
    multipart: Multipart,
) -> Result<ApiResponse<Value>, ApiError> {
    let form = read_multipart(multipart).await?;

    let recipient_type: RecipientType = form
        .required_text("recipient_type")?
        .parse()
        .map_err(ApiError::bad_request)?;

    if !recipient_type.is_bulk() {
        return Err(ApiError::bad_request("Invalid recipient type"));
    }

    let file_title = form.required_text("file_title")?.to_string();
    let message = form
        .text("message")
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());

    let attachment = stored_attachment(&form).await?;

    let count = CommunicationService::new()
        .await?
        .send_bulk(
            NewCommunication {
                sender_id: auth_user.id,
                file_title,
                message,
                attachment,
            },
            recipient_type,
        )
        .await?;

    tracing::info!(?recipient_type, count, "Sent bulk communication");

    Ok(ApiResponse::created(json!({
        "message": format!("Communication sent to {} properties successfully", count),
        "count": count,
        "recipient_type": recipient_type,
    })))
}
