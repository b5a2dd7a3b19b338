use chrono::NaiveDate;
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password;
use crate::config;
use crate::database::manager::DatabaseManager;
use crate::database::models::occupant::Occupant;
use crate::database::models::property::{Property, PropertyType};

use super::ServiceError;

#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct PropertyTypeCount {
    pub property_type: PropertyType,
    pub count: i64,
    pub active_count: i64,
}

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub property_counts: Vec<PropertyTypeCount>,
    pub total_occupants: i64,
}

#[derive(Debug, Serialize)]
pub struct PropertyWithOccupant {
    #[serde(flatten)]
    pub property: Property,
    pub occupant: Option<Occupant>,
}

#[derive(Debug, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub pages: i64,
}

impl Pagination {
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        let pages = if limit > 0 {
            (total + limit - 1) / limit
        } else {
            0
        };
        Self { page, limit, total, pages }
    }
}

#[derive(Debug, Serialize)]
pub struct PropertiesPage {
    pub properties: Vec<PropertyWithOccupant>,
    pub pagination: Pagination,
}

#[derive(Debug)]
pub struct NewProperty {
    pub property_type: PropertyType,
    pub property_code: String,
    pub occupant_name: String,
    pub occupant_email: String,
    pub occupant_contact: Option<String>,
    pub start_date: NaiveDate,
}

#[derive(Debug)]
pub struct OccupantUpdate {
    pub name: String,
    pub email: String,
    pub contact: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
}

pub struct PropertyService {
    pool: PgPool,
}

impl PropertyService {
    pub async fn new() -> Result<Self, ServiceError> {
        let pool = DatabaseManager::pool().await?;
        Ok(Self { pool })
    }

    /// Per-type property counts plus the active occupant total
    pub async fn dashboard(&self) -> Result<DashboardSummary, ServiceError> {
        let property_counts: Vec<PropertyTypeCount> = sqlx::query_as(
            "SELECT property_type,
                    COUNT(*) AS count,
                    COUNT(*) FILTER (WHERE status = 'Active') AS active_count
             FROM properties
             GROUP BY property_type
             ORDER BY property_type",
        )
        .fetch_all(&self.pool)
        .await?;

        let total_occupants: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM occupants WHERE status = 'Active'")
                .fetch_one(&self.pool)
                .await?;

        Ok(DashboardSummary {
            property_counts,
            total_occupants: total_occupants.0,
        })
    }

    /// Active properties of one type, ordered by code, with their active occupant
    pub async fn list_by_type(
        &self,
        property_type: PropertyType,
        page: i64,
        limit: i64,
    ) -> Result<PropertiesPage, ServiceError> {
        let page = page.max(1);
        let limit = limit.clamp(1, 100);
        let offset = (page - 1) * limit;

        let total: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM properties WHERE property_type = $1 AND status = 'Active'",
        )
        .bind(property_type)
        .fetch_one(&self.pool)
        .await?;

        let properties: Vec<Property> = sqlx::query_as(
            "SELECT * FROM properties
             WHERE property_type = $1 AND status = 'Active'
             ORDER BY property_code ASC
             LIMIT $2 OFFSET $3",
        )
        .bind(property_type)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        let ids: Vec<Uuid> = properties.iter().map(|p| p.id).collect();
        let occupants: Vec<Occupant> = if ids.is_empty() {
            vec![]
        } else {
            sqlx::query_as(
                "SELECT * FROM occupants WHERE property_id = ANY($1) AND status = 'Active'",
            )
            .bind(&ids)
            .fetch_all(&self.pool)
            .await?
        };

        let rows = properties
            .into_iter()
            .map(|property| {
                let occupant = occupants
                    .iter()
                    .find(|o| o.property_id == property.id)
                    .cloned();
                PropertyWithOccupant { property, occupant }
            })
            .collect();

        Ok(PropertiesPage {
            properties: rows,
            pagination: Pagination::new(page, limit, total.0),
        })
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Property>, ServiceError> {
        let property = sqlx::query_as("SELECT * FROM properties WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(property)
    }

    pub async fn find_active_by_code(&self, code: &str) -> Result<Option<Property>, ServiceError> {
        let property = sqlx::query_as(
            "SELECT * FROM properties WHERE property_code = $1 AND status = 'Active'",
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(property)
    }

    /// Create a property together with its first occupant. The occupant gets
    /// the configured default password and must change it on first login.
    pub async fn create_with_occupant(
        &self,
        new: NewProperty,
    ) -> Result<(Property, Occupant, String), ServiceError> {
        let existing: Option<(Uuid,)> =
            sqlx::query_as("SELECT id FROM properties WHERE property_code = $1")
                .bind(&new.property_code)
                .fetch_optional(&self.pool)
                .await?;

        if existing.is_some() {
            return Err(ServiceError::Conflict(
                "Property code already exists".to_string(),
            ));
        }

        let temp_password = config::config().auth.default_occupant_password.clone();
        let password_hash = password::hash_password(&temp_password)?;

        let mut tx = self.pool.begin().await?;

        let property: Property = sqlx::query_as(
            "INSERT INTO properties (property_code, property_type, status)
             VALUES ($1, $2, 'Active')
             RETURNING *",
        )
        .bind(&new.property_code)
        .bind(new.property_type)
        .fetch_one(&mut *tx)
        .await?;

        let occupant: Occupant = sqlx::query_as(
            "INSERT INTO occupants
                (property_id, name, email, contact, password_hash, is_first_login, status, start_date)
             VALUES ($1, $2, $3, $4, $5, TRUE, 'Active', $6)
             RETURNING *",
        )
        .bind(property.id)
        .bind(&new.occupant_name)
        .bind(&new.occupant_email)
        .bind(&new.occupant_contact)
        .bind(&password_hash)
        .bind(new.start_date)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok((property, occupant, temp_password))
    }

    /// Property with its active occupants, or NotFound
    pub async fn details(
        &self,
        property_id: Uuid,
    ) -> Result<(Property, Vec<Occupant>), ServiceError> {
        let property = self
            .find_by_id(property_id)
            .await?
            .ok_or_else(|| ServiceError::NotFound("Property not found".to_string()))?;

        let occupants: Vec<Occupant> = sqlx::query_as(
            "SELECT * FROM occupants WHERE property_id = $1 AND status = 'Active'
             ORDER BY created_at ASC",
        )
        .bind(property_id)
        .fetch_all(&self.pool)
        .await?;

        Ok((property, occupants))
    }

    /// Update the active occupant of a property. Missing property is an
    /// error; a property without an occupant is a no-op.
    pub async fn update_occupant(
        &self,
        property_id: Uuid,
        update: OccupantUpdate,
    ) -> Result<(), ServiceError> {
        let (_, occupants) = self.details(property_id).await?;

        if let Some(occupant) = occupants.first() {
            sqlx::query(
                "UPDATE occupants
                 SET name = $1, email = $2, contact = $3,
                     start_date = $4, end_date = $5, updated_at = now()
                 WHERE id = $6",
            )
            .bind(&update.name)
            .bind(&update.email)
            .bind(&update.contact)
            .bind(update.start_date)
            .bind(update.end_date)
            .bind(occupant.id)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Rehash the default password for the property's active occupant and
    /// force a password change on next login. Returns the issued password.
    pub async fn reset_password_to_default(
        &self,
        property_id: Uuid,
    ) -> Result<String, ServiceError> {
        let (_, occupants) = self.details(property_id).await?;

        let occupant = occupants
            .first()
            .ok_or_else(|| ServiceError::NotFound("No active occupant found".to_string()))?;

        let temp_password = config::config().auth.default_occupant_password.clone();
        let password_hash = password::hash_password(&temp_password)?;

        sqlx::query(
            "UPDATE occupants
             SET password_hash = $1, is_first_login = TRUE, updated_at = now()
             WHERE id = $2",
        )
        .bind(&password_hash)
        .bind(occupant.id)
        .execute(&self.pool)
        .await?;

        Ok(temp_password)
    }

    /// Resolve the target properties of a bulk communication class
    pub async fn ids_by_type(
        &self,
        property_type: Option<PropertyType>,
    ) -> Result<Vec<Uuid>, ServiceError> {
        let rows: Vec<(Uuid,)> = match property_type {
            Some(ptype) => {
                sqlx::query_as("SELECT id FROM properties WHERE property_type = $1")
                    .bind(ptype)
                    .fetch_all(&self.pool)
                    .await?
            }
            None => {
                sqlx::query_as("SELECT id FROM properties")
                    .fetch_all(&self.pool)
                    .await?
            }
        };

        Ok(rows.into_iter().map(|(id,)| id).collect())
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_rounds_up_partial_pages() {
        let p = Pagination::new(1, 10, 25);
        assert_eq!(p.pages, 3);

        let p = Pagination::new(2, 10, 30);
        assert_eq!(p.pages, 3);

        let p = Pagination::new(1, 10, 0);
        assert_eq!(p.pages, 0);
    }
}
