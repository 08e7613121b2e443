//! Product Category Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{ProductCategory, ProductCategoryCreate, ProductCategoryUpdate};
use crate::utils::time::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ProductCategoryRepository {
    base: BaseRepository,
}

impl ProductCategoryRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all categories including inactive
    pub async fn find_all(&self) -> RepoResult<Vec<ProductCategory>> {
        let categories: Vec<ProductCategory> = self
            .base
            .db()
            .query("SELECT * FROM product_category ORDER BY display_order, name")
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Active categories in display order
    pub async fn find_active(&self) -> RepoResult<Vec<ProductCategory>> {
        let categories: Vec<ProductCategory> = self
            .base
            .db()
            .query(
                "SELECT * FROM product_category WHERE is_active = true ORDER BY display_order, name",
            )
            .await?
            .take(0)?;
        Ok(categories)
    }

    /// Find category by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<ProductCategory>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let category: Option<ProductCategory> = self.base.db().select(thing).await?;
        Ok(category)
    }

    /// Find category by its exact name
    ///
    /// Reviews reference categories by name, not by record id.
    pub async fn find_by_name(&self, name: &str) -> RepoResult<Option<ProductCategory>> {
        let name_owned = name.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM product_category WHERE name = $name LIMIT 1")
            .bind(("name", name_owned))
            .await?;
        let categories: Vec<ProductCategory> = result.take(0)?;
        Ok(categories.into_iter().next())
    }

    /// Create a new category
    pub async fn create(&self, data: ProductCategoryCreate) -> RepoResult<ProductCategory> {
        // Check duplicate name
        if self.find_by_name(&data.name).await?.is_some() {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                data.name
            )));
        }

        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE product_category SET
                    name = $name,
                    seo_description = $seo_description,
                    faqs = $faqs,
                    is_active = true,
                    display_order = $display_order,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("name", data.name))
            .bind(("seo_description", data.seo_description.unwrap_or_default()))
            .bind(("faqs", data.faqs))
            .bind(("display_order", data.display_order.unwrap_or(0)))
            .bind(("now", now_rfc3339()))
            .await?;

        let created: Option<ProductCategory> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create category".to_string()))
    }

    /// Update a category
    pub async fn update(
        &self,
        id: &str,
        data: ProductCategoryUpdate,
    ) -> RepoResult<ProductCategory> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let existing = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        // Check duplicate name if changing
        if let Some(ref new_name) = data.name
            && new_name != &existing.name
            && self.find_by_name(new_name).await?.is_some()
        {
            return Err(RepoError::Duplicate(format!(
                "Category '{}' already exists",
                new_name
            )));
        }

        self.base
            .db()
            .query("UPDATE $thing SET updated_at = $now")
            .bind(("thing", thing.clone()))
            .bind(("now", now_rfc3339()))
            .await?
            .check()?;

        let updated: Option<ProductCategory> = self.base.db().update(thing).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))
    }

    /// Hard delete a category
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Category {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}
