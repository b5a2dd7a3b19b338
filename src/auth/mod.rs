pub mod password;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::config;
use crate::database::models::admin_user::AdminUser;
use crate::database::models::occupant::Occupant;
use crate::database::models::property::{Property, PropertyType};

/// Portal role carried in the JWT `role` claim
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    Occupant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub role: Role,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub property_type: Option<PropertyType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_login: Option<bool>,
    pub exp: i64,
    pub iat: i64,
}

impl Claims {
    fn stamped(mut self) -> Self {
        let now = Utc::now();
        let expiry_hours = config::config().security.jwt_expiry_hours;
        self.iat = now.timestamp();
        self.exp = (now + Duration::hours(expiry_hours as i64)).timestamp();
        self
    }

    pub fn for_admin(admin: &AdminUser) -> Self {
        Self {
            sub: admin.id,
            role: Role::Admin,
            email: admin.email.clone(),
            name: admin.name.clone(),
            property_id: None,
            property_code: None,
            property_type: None,
            first_login: None,
            exp: 0,
            iat: 0,
        }
        .stamped()
    }

    pub fn for_occupant(occupant: &Occupant, property: &Property) -> Self {
        Self {
            sub: occupant.id,
            role: Role::Occupant,
            email: occupant.email.clone(),
            name: occupant.name.clone(),
            property_id: Some(occupant.property_id),
            property_code: Some(property.property_code.clone()),
            property_type: Some(property.property_type),
            first_login: Some(occupant.is_first_login),
            exp: 0,
            iat: 0,
        }
        .stamped()
    }
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("JWT generation error: {0}")]
    TokenGeneration(String),

    #[error("JWT secret not configured")]
    InvalidSecret,

    #[error("{0}")]
    InvalidToken(String),

    #[error("password hash error: {0}")]
    Hash(String),
}

pub fn generate_jwt(claims: &Claims) -> Result<String, AuthError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let encoding_key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::default();

    encode(&header, claims, &encoding_key).map_err(|e| AuthError::TokenGeneration(e.to_string()))
}

pub fn decode_jwt(token: &str) -> Result<Claims, AuthError> {
    let secret = &config::config().security.jwt_secret;

    if secret.is_empty() {
        return Err(AuthError::InvalidSecret);
    }

    let decoding_key = DecodingKey::from_secret(secret.as_bytes());
    let validation = Validation::default();

    let token_data =
        decode::<Claims>(token, &decoding_key, &validation).map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                AuthError::InvalidToken("Token expired".to_string())
            }
            _ => AuthError::InvalidToken("Invalid token".to_string()),
        })?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_admin() -> AdminUser {
        use crate::database::models::admin_user::AdminRole;
        use crate::database::models::RecordStatus;

        AdminUser {
            id: Uuid::new_v4(),
            email: "admin@nithshop.example.com".to_string(),
            password_hash: "x".to_string(),
            name: "System Administrator".to_string(),
            role: AdminRole::Admin,
            status: RecordStatus::Active,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn admin_claims_round_trip() {
        let claims = Claims::for_admin(&sample_admin());
        let token = generate_jwt(&claims).expect("token");
        let decoded = decode_jwt(&token).expect("claims");

        assert_eq!(decoded.sub, claims.sub);
        assert_eq!(decoded.role, Role::Admin);
        assert!(decoded.property_id.is_none());
        assert!(decoded.exp > decoded.iat);
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(decode_jwt("not-a-token").is_err());
    }

    #[test]
    fn role_claim_serializes_lowercase() {
        let claims = Claims::for_admin(&sample_admin());
        let value = serde_json::to_value(&claims).unwrap();
        assert_eq!(value["role"], "admin");
        // Occupant-only claims stay out of admin tokens entirely
        assert!(value.get("property_id").is_none());
    }
}
