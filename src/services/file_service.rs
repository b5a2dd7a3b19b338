use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::models::file_upload::{FileUpload, UploaderRole};

use super::storage::StoredFile;
use super::ServiceError;

#[derive(Debug)]
pub struct NewFileUpload {
    pub property_id: Uuid,
    pub uploaded_by: UploaderRole,
    pub uploaded_by_id: Uuid,
    pub file_title: String,
    pub description: Option<String>,
}

pub struct FileService {
    pool: PgPool,
}

impl FileService {
    pub async fn new() -> Result<Self, ServiceError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub async fn create(
        &self,
        new: NewFileUpload,
        stored: StoredFile,
    ) -> Result<FileUpload, ServiceError> {
        let property: Option<(Uuid,)> = sqlx::query_as("SELECT id FROM properties WHERE id = $1")
            .bind(new.property_id)
            .fetch_optional(&self.pool)
            .await?;

        if property.is_none() {
            return Err(ServiceError::NotFound("Property not found".to_string()));
        }

        let file: FileUpload = sqlx::query_as(
            "INSERT INTO file_uploads
                (property_id, uploaded_by, uploaded_by_id, file_title, description,
                 file_path, file_name, file_size, status)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, 'active')
             RETURNING *",
        )
        .bind(new.property_id)
        .bind(new.uploaded_by)
        .bind(new.uploaded_by_id)
        .bind(&new.file_title)
        .bind(&new.description)
        .bind(&stored.file_path)
        .bind(&stored.file_name)
        .bind(stored.file_size)
        .fetch_one(&self.pool)
        .await?;

        Ok(file)
    }

    /// Active files for a property, newest first
    pub async fn list_for_property(
        &self,
        property_id: Uuid,
    ) -> Result<Vec<FileUpload>, ServiceError> {
        let files = sqlx::query_as(
            "SELECT * FROM file_uploads
             WHERE property_id = $1 AND status = 'active'
             ORDER BY created_at DESC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(files)
    }

    /// Active files a given occupant uploaded to their property
    pub async fn list_for_occupant(
        &self,
        property_id: Uuid,
        occupant_id: Uuid,
    ) -> Result<Vec<FileUpload>, ServiceError> {
        let files = sqlx::query_as(
            "SELECT * FROM file_uploads
             WHERE property_id = $1
               AND uploaded_by = 'occupant'
               AND uploaded_by_id = $2
               AND status = 'active'
             ORDER BY created_at DESC",
        )
        .bind(property_id)
        .bind(occupant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(files)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<FileUpload>, ServiceError> {
        let file = sqlx::query_as("SELECT * FROM file_uploads WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(file)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        let result = sqlx::query("DELETE FROM file_uploads WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("File not found".to_string()));
        }

        Ok(())
    }
}
