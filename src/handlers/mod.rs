pub mod protected;
pub mod public;

use std::collections::HashMap;

use axum::body::Bytes;
use axum::extract::Multipart;
use uuid::Uuid;

use crate::auth::Role;
use crate::error::ApiError;
use crate::middleware::auth::AuthUser;

/// A `file` part pulled out of a multipart form
pub struct UploadedPart {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Text fields plus the optional `file` part of a multipart request
pub struct MultipartForm {
    pub fields: HashMap<String, String>,
    pub file: Option<UploadedPart>,
}

impl MultipartForm {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(|s| s.as_str())
    }

    pub fn required_text(&self, name: &str) -> Result<&str, ApiError> {
        self.text(name)
            .filter(|v| !v.is_empty())
            .ok_or_else(|| ApiError::bad_request(format!("Missing field: {}", name)))
    }

    pub fn uuid(&self, name: &str) -> Result<Uuid, ApiError> {
        let raw = self.required_text(name)?;
        Uuid::parse_str(raw)
            .map_err(|_| ApiError::bad_request(format!("Invalid UUID in field: {}", name)))
    }
}

/// Drain a multipart request into text fields and at most one file part
pub async fn read_multipart(mut multipart: Multipart) -> Result<MultipartForm, ApiError> {
    let mut form = MultipartForm {
        fields: HashMap::new(),
        file: None,
    };

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart payload: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();

        if name == "file" {
            let file_name = field.file_name().unwrap_or("upload.pdf").to_string();
            let content_type = field.content_type().map(|s| s.to_string());
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read file: {}", e)))?;
            form.file = Some(UploadedPart {
                file_name,
                content_type,
                bytes,
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| ApiError::bad_request(format!("Failed to read field: {}", e)))?;
            form.fields.insert(name, value);
        }
    }

    Ok(form)
}

/// Property-scoped access: admins see everything, occupants only their own
/// property.
pub fn ensure_property_access(auth: &AuthUser, property_id: Uuid) -> Result<(), ApiError> {
    match auth.role {
        Role::Admin => Ok(()),
        Role::Occupant if auth.property_id == Some(property_id) => Ok(()),
        Role::Occupant => Err(ApiError::forbidden("Access denied to this property")),
    }
}

/// Occupant-scoped access: occupants may only act as themselves
pub fn ensure_occupant_access(auth: &AuthUser, occupant_id: Uuid) -> Result<(), ApiError> {
    match auth.role {
        Role::Admin => Ok(()),
        Role::Occupant if auth.id == occupant_id => Ok(()),
        Role::Occupant => Err(ApiError::forbidden("Access denied")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn occupant_user(property_id: Uuid) -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role: Role::Occupant,
            email: "o@example.com".to_string(),
            name: "Occupant".to_string(),
            property_id: Some(property_id),
            property_code: Some("SHOP001".to_string()),
            property_type: None,
            first_login: Some(false),
        }
    }

    fn admin_user() -> AuthUser {
        AuthUser {
            id: Uuid::new_v4(),
            role: Role::Admin,
            email: "a@example.com".to_string(),
            name: "Admin".to_string(),
            property_id: None,
            property_code: None,
            property_type: None,
            first_login: None,
        }
    }

    #[test]
    fn admin_reaches_any_property() {
        assert!(ensure_property_access(&admin_user(), Uuid::new_v4()).is_ok());
    }

    #[test]
    fn occupant_limited_to_own_property() {
        let property_id = Uuid::new_v4();
        let user = occupant_user(property_id);
        assert!(ensure_property_access(&user, property_id).is_ok());
        assert!(ensure_property_access(&user, Uuid::new_v4()).is_err());
    }

    #[test]
    fn occupant_limited_to_self() {
        let user = occupant_user(Uuid::new_v4());
        assert!(ensure_occupant_access(&user, user.id).is_ok());
        assert!(ensure_occupant_access(&user, Uuid::new_v4()).is_err());
    }
}
