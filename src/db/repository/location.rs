//! Location Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Location, LocationCreate, LocationUpdate};
use crate::utils::time::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct LocationRepository {
    base: BaseRepository,
}

impl LocationRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all locations including inactive
    pub async fn find_all(&self) -> RepoResult<Vec<Location>> {
        let locations: Vec<Location> = self
            .base
            .db()
            .query("SELECT * FROM location ORDER BY display_order, name")
            .await?
            .take(0)?;
        Ok(locations)
    }

    /// Active locations in display order
    ///
    /// Fallback resolution on the public pages depends on this ordering.
    pub async fn find_active(&self) -> RepoResult<Vec<Location>> {
        let locations: Vec<Location> = self
            .base
            .db()
            .query("SELECT * FROM location WHERE is_active = true ORDER BY display_order, name")
            .await?
            .take(0)?;
        Ok(locations)
    }

    /// Find location by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Location>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let location: Option<Location> = self.base.db().select(thing).await?;
        Ok(location)
    }

    /// Create a new location
    pub async fn create(&self, data: LocationCreate) -> RepoResult<Location> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE location SET
                    name = $name,
                    street = $street,
                    postal_code = $postal_code,
                    city = $city,
                    latitude = $latitude,
                    longitude = $longitude,
                    phone = $phone,
                    email = $email,
                    is_active = true,
                    is_default = $is_default,
                    display_order = $display_order,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("street", data.street))
            .bind(("postal_code", data.postal_code))
            .bind(("city", data.city))
            .bind(("latitude", data.latitude))
            .bind(("longitude", data.longitude))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("is_default", data.is_default.unwrap_or(false)))
            .bind(("display_order", data.display_order.unwrap_or(0)))
            .bind(("now", now_rfc3339()))
            .await?;

        let created: Option<Location> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create location".to_string()))
    }

    /// Update a location
    pub async fn update(&self, id: &str, data: LocationUpdate) -> RepoResult<Location> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Location {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET updated_at = $now")
            .bind(("thing", thing.clone()))
            .bind(("now", now_rfc3339()))
            .await?
            .check()?;

        let updated: Option<Location> = self.base.db().update(thing).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Location {} not found", id)))
    }

    /// Hard delete a location
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Location {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
