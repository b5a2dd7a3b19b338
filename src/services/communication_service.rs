use futures::future::try_join_all;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::communication::{Communication, RecipientType};

use super::property_service::PropertyService;
use super::storage::StoredFile;
use super::ServiceError;

#[derive(Debug)]
pub struct NewCommunication {
    pub sender_id: Uuid,
    pub file_title: String,
    pub message: Option<String>,
    pub attachment: Option<StoredFile>,
}

pub struct CommunicationService {
    pool: PgPool,
}

impl CommunicationService {
    pub async fn new() -> Result<Self, ServiceError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    async fn insert(
        &self,
        new: &NewCommunication,
        recipient_type: RecipientType,
        recipient_property_id: Uuid,
    ) -> Result<Communication, ServiceError> {
        let communication: Communication = sqlx::query_as(
            "INSERT INTO communications
                (sender_id, recipient_type, recipient_property_id, file_title, message,
                 file_path, file_name, file_size, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'sent')
             RETURNING *",
        )
        .bind(new.sender_id)
        .bind(recipient_type)
        .bind(recipient_property_id)
        .bind(&new.file_title)
        .bind(&new.message)
        .bind(new.attachment.as_ref().map(|a| a.file_path.clone()))
        .bind(new.attachment.as_ref().map(|a| a.file_name.clone()))
        .bind(new.attachment.as_ref().map(|a| a.file_size))
        .fetch_one(&self.pool)
        .await?;

        Ok(communication)
    }

    /// Send to a single property
    pub async fn send_individual(
        &self,
        new: NewCommunication,
        property_id: Uuid,
    ) -> Result<Communication, ServiceError> {
        let property: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?;

        if property.is_none() {
            return Err(ServiceError::NotFound("Property not found".to_string()));
        }

        self.insert(&new, RecipientType::Individual, property_id).await
    }

    /// Fan a bulk communication out to every property of the recipient
    /// class: one row per target, all sharing the attachment metadata.
    pub async fn send_bulk(
        &self,
        new: NewCommunication,
        recipient_type: RecipientType,
    ) -> Result<usize, ServiceError> {
        let properties = PropertyService::new()
            .await?
            .ids_by_type(recipient_type.target_property_type())
            .await?;

        if properties.is_empty() {
            return Err(ServiceError::NotFound(
                "No properties found for the specified type".to_string(),
            ));
        }

        let inserts = properties
            .iter()
            .map(|&property_id| self.insert(&new, recipient_type, property_id));

        let created = try_join_all(inserts).await?;
        Ok(created.len())
    }

    /// Communications addressed to a property, newest first
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<Communication>, ServiceError> {
        let communications = sqlx::query_as(
            "SELECT * FROM communications
             WHERE recipient_property_id = $1
             ORDER BY sent_at DESC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(communications)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Communication>, ServiceError> {
        let communication = sqlx::query_as("SELECT * FROM communications WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(communication)
    }

    pub async fn mark_read(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = sqlx::query(
            "UPDATE communications SET status = 'read', updated_at = now() WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Communication not found".to_string()));
        }

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM communications WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Communication not found".to_string()));
        }

        Ok(())
    }
}
