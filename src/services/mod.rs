pub mod admin_service;
pub mod communication_service;
pub mod file_service;
pub mod occupant_service;
pub mod property_service;
pub mod storage;

use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Shared error type for the service layer
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Database(#[from] DatabaseError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("password hash error: {0}")]
    Password(String),
}

impl From<crate::auth::AuthError> for ServiceError {
    fn from(err: crate::auth::AuthError) -> Self {
        ServiceError::Password(err.to_string())
    }
}
