//! Site Settings Repository (Singleton)

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{SiteSettings, SiteSettingsUpdate};
use crate::utils::time::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

const TABLE: &str = "site_settings";
const SINGLETON_ID: &str = "main";

#[derive(Clone)]
pub struct SiteSettingsRepository {
    base: BaseRepository,
}

impl SiteSettingsRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Get or create the singleton settings record
    pub async fn get_or_create(&self) -> RepoResult<SiteSettings> {
        // Try to get existing
        if let Some(settings) = self.get().await? {
            return Ok(settings);
        }

        // Create new singleton with defaults
        let settings = SiteSettings::default();

        let created: Option<SiteSettings> = self
            .base
            .db()
            .create((TABLE, SINGLETON_ID))
            .content(settings)
            .await?;
        created.ok_or_else(|| RepoError::Database("Failed to create site settings".to_string()))
    }

    /// Get the singleton settings record
    pub async fn get(&self) -> RepoResult<Option<SiteSettings>> {
        let settings: Option<SiteSettings> = self.base.db().select((TABLE, SINGLETON_ID)).await?;
        Ok(settings)
    }

    /// Update site settings
    pub async fn update(&self, data: SiteSettingsUpdate) -> RepoResult<SiteSettings> {
        // Ensure singleton exists
        self.get_or_create().await?;

        // Update timestamp first
        let singleton_id = RecordId::from_table_key(TABLE, SINGLETON_ID);
        let _ = self
            .base
            .db()
            .query("UPDATE $id SET updated_at = $now")
            .bind(("id", singleton_id.clone()))
            .bind(("now", now_rfc3339()))
            .await?;

        // Merge update data
        let updated: Option<SiteSettings> =
            self.base.db().update(singleton_id).merge(data).await?;
        updated.ok_or_else(|| RepoError::Database("Failed to update site settings".to_string()))
    }
}
