//! Field Staff Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{FieldStaff, FieldStaffCreate, FieldStaffUpdate};
use crate::utils::time::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct FieldStaffRepository {
    base: BaseRepository,
}

impl FieldStaffRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all staff including inactive
    pub async fn find_all(&self) -> RepoResult<Vec<FieldStaff>> {
        let staff: Vec<FieldStaff> = self
            .base
            .db()
            .query("SELECT * FROM field_staff ORDER BY display_order, name")
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Active staff in display order
    ///
    /// Contact assignment treats the first postal match as the primary
    /// contact, so the ordering here is part of the contract.
    pub async fn find_active(&self) -> RepoResult<Vec<FieldStaff>> {
        let staff: Vec<FieldStaff> = self
            .base
            .db()
            .query("SELECT * FROM field_staff WHERE is_active = true ORDER BY display_order, name")
            .await?
            .take(0)?;
        Ok(staff)
    }

    /// Find staff member by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<FieldStaff>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let staff: Option<FieldStaff> = self.base.db().select(thing).await?;
        Ok(staff)
    }

    /// Create a new staff member
    pub async fn create(&self, data: FieldStaffCreate) -> RepoResult<FieldStaff> {
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE field_staff SET
                    name = $name,
                    role_title = $role_title,
                    phone = $phone,
                    email = $email,
                    photo_url = $photo_url,
                    assigned_postal_codes = $assigned_postal_codes,
                    is_active = true,
                    display_order = $display_order,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("role_title", data.role_title))
            .bind(("phone", data.phone))
            .bind(("email", data.email))
            .bind(("photo_url", data.photo_url))
            .bind(("assigned_postal_codes", data.assigned_postal_codes))
            .bind(("display_order", data.display_order.unwrap_or(0)))
            .bind(("now", now_rfc3339()))
            .await?;

        let created: Option<FieldStaff> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create field staff".to_string()))
    }

    /// Update a staff member
    pub async fn update(&self, id: &str, data: FieldStaffUpdate) -> RepoResult<FieldStaff> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Field staff {} not found", id)))?;

        self.base
            .db()
            .query("UPDATE $thing SET updated_at = $now")
            .bind(("thing", thing.clone()))
            .bind(("now", now_rfc3339()))
            .await?
            .check()?;

        let updated: Option<FieldStaff> = self.base.db().update(thing).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Field staff {} not found", id)))
    }

    /// Hard delete a staff member
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Field staff {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
