use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::property::PropertyType;

/// Addressing mode of a communication. Bulk sends fan out to one row per
/// target property, each row keeping the originating recipient type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "recipient_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecipientType {
    Individual,
    AllShops,
    AllBooths,
    AllCanteens,
    AllProperties,
}

impl RecipientType {
    /// Property type targeted by a bulk recipient class; `None` means
    /// every property (or, for `Individual`, a single explicit target).
    pub fn target_property_type(&self) -> Option<PropertyType> {
        match self {
            RecipientType::AllShops => Some(PropertyType::Shop),
            RecipientType::AllBooths => Some(PropertyType::Booth),
            RecipientType::AllCanteens => Some(PropertyType::Canteen),
            RecipientType::AllProperties | RecipientType::Individual => None,
        }
    }

    pub fn is_bulk(&self) -> bool {
        !matches!(self, RecipientType::Individual)
    }
}

impl std::str::FromStr for RecipientType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "individual" => Ok(RecipientType::Individual),
            "all_shops" => Ok(RecipientType::AllShops),
            "all_booths" => Ok(RecipientType::AllBooths),
            "all_canteens" => Ok(RecipientType::AllCanteens),
            "all_properties" => Ok(RecipientType::AllProperties),
            other => Err(format!("Invalid recipient type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "communication_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CommunicationStatus {
    Sent,
    Delivered,
    Read,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Communication {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub recipient_type: RecipientType,
    pub recipient_property_id: Uuid,
    pub file_title: String,
    pub message: Option<String>,
    pub file_path: Option<String>,
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub status: CommunicationStatus,
    pub sent_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_classes_target_expected_property_types() {
        assert_eq!(
            RecipientType::AllShops.target_property_type(),
            Some(PropertyType::Shop)
        );
        assert_eq!(
            RecipientType::AllBooths.target_property_type(),
            Some(PropertyType::Booth)
        );
        assert_eq!(
            RecipientType::AllCanteens.target_property_type(),
            Some(PropertyType::Canteen)
        );
        assert_eq!(RecipientType::AllProperties.target_property_type(), None);
    }

    #[test]
    fn individual_is_not_bulk() {
        assert!(!RecipientType::Individual.is_bulk());
        assert!(RecipientType::AllProperties.is_bulk());
    }

    #[test]
    fn parses_recipient_type_strings() {
        assert_eq!(
            "all_canteens".parse::<RecipientType>().unwrap(),
            RecipientType::AllCanteens
        );
        assert!("everyone".parse::<RecipientType>().is_err());
    }

    #[test]
    fn recipient_type_uses_snake_case_on_the_wire() {
        let v = serde_json::to_value(RecipientType::AllShops).unwrap();
        assert_eq!(v, "all_shops");
        let parsed: RecipientType = serde_json::from_value(v).unwrap();
        assert_eq!(parsed, RecipientType::AllShops);
    }
}
