use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::RecordStatus;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Occupant {
    pub id: Uuid,
    pub property_id: Uuid,
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_first_login: bool,
    pub status: RecordStatus,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
