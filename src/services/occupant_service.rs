use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::database::manager::DatabaseManager;
use crate::database::models::occupant::Occupant;
use crate::database::models::property::Property;

use super::ServiceError;

pub struct OccupantService {
    pool: PgPool,
}

impl OccupantService {
    pub async fn new() -> Result<Self, ServiceError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Active occupant for a login attempt, scoped to the property
    pub async fn find_for_login(
        &self,
        property_id: Uuid,
        email: &str,
    ) -> Result<Option<Occupant>, ServiceError> {
        let occupant = sqlx::query_as(
            "SELECT * FROM occupants
             WHERE email = $1 AND property_id = $2 AND status = 'Active'",
        )
        .bind(email)
        .bind(property_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(occupant)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Occupant>, ServiceError> {
        let occupant = sqlx::query_as("SELECT * FROM occupants WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(occupant)
    }

    /// Occupant together with the property it belongs to
    pub async fn find_with_property(
        &self,
        id: Uuid,
    ) -> Result<Option<(Occupant, Property)>, ServiceError> {
        let Some(occupant) = self.find_by_id(id).await? else {
            return Ok(None);
        };

        let property: Option<Property> = sqlx::query_as("SELECT * FROM properties WHERE id = $1")
            .bind(occupant.property_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(property.map(|p| (occupant, p)))
    }

    /// Change an occupant's password; clears the first-login flag so the
    /// client stops forcing the password-change screen.
    pub async fn change_password(
        &self,
        id: Uuid,
        plain_password: &str,
    ) -> Result<(), ServiceError> {
        let password_hash = password::hash_password(plain_password)?;

        let result = sqlx::query(
            "UPDATE occupants
             SET password_hash = $1, is_first_login = FALSE, updated_at = now()
             WHERE id = $2",
        )
        .bind(&password_hash)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(ServiceError::NotFound("Occupant not found".to_string()));
        }

        Ok(())
    }
}
