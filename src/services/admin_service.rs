use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::database::manager::DatabaseManager;
use crate::database::models::admin_user::{AdminRole, AdminUser};
use crate::database::models::RecordStatus;

use super::ServiceError;

pub struct AdminService {
    pool: PgPool,
}

impl AdminService {
    pub async fn new() -> Result<Self, ServiceError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    pub async fn count(&self) -> Result<i64, ServiceError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM admin_users")
            .fetch_one(&self.pool)
            .await?;
        Ok(count.0)
    }

    pub async fn find_active_by_email(
        &self,
        email: &str,
    ) -> Result<Option<AdminUser>, ServiceError> {
        let admin = sqlx::query_as(
            "SELECT * FROM admin_users WHERE email = $1 AND status = 'Active'",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;
        Ok(admin)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminUser>, ServiceError> {
        let admin = sqlx::query_as("SELECT * FROM admin_users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(admin)
    }

    pub async fn create(
        &self,
        email: &str,
        plain_password: &str,
        name: &str,
        role: AdminRole,
    ) -> Result<AdminUser, ServiceError> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM admin_users WHERE email = $1")
                .bind(email)
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Admin with this email already exists".to_string(),
            ));
        }

        let password_hash = password::hash_password(plain_password)?;

        let admin: AdminUser = sqlx::query_as(
            "INSERT INTO admin_users (email, password_hash, name, role, status)
             VALUES ($1, $2, $3, $4, 'Active')
             RETURNING *",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(name)
        .bind(role)
        .fetch_one(&self.pool)
        .await?;

        Ok(admin)
    }

    pub async fn list(&self) -> Result<Vec<AdminUser>, ServiceError> {
        let admins = sqlx::query_as("SELECT * FROM admin_users ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await?;
        Ok(admins)
    }

    pub async fn set_status(&self, id: Uuid, status: RecordStatus) -> Result<(), ServiceError> {
        let result =
            sqlx::query("UPDATE admin_users SET status = $1, updated_at = now() WHERE id = $2")
                .bind(status)
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Admin not found".to_string()));
        }

        Ok(())
    }

    pub async fn update_password(&self, id: Uuid, plain_password: &str) -> Result<(), ServiceError> {
        let password_hash = password::hash_password(plain_password)?;

        let result = sqlx::query(
            "UPDATE admin_users SET password_hash = $1, updated_at = now() WHERE id = $2",
        )
        .bind(&password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Admin not found".to_string()));
        }

        Ok(())
    }
}
