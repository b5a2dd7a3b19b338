pub mod admin_user;
pub mod communication;
pub mod file_upload;
pub mod occupant;
pub mod property;

use serde::{Deserialize, Serialize};

/// Active/Inactive flag shared by properties, occupants and admin accounts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "record_status")]
pub enum RecordStatus {
    Active,
    Inactive,
}
