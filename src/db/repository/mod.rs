//! Repository Module
//!
//! Per-entity CRUD over the embedded SurrealDB store.
//!
//! ID convention: the full stack uses the `"table:id"` string form.
//! Parse with `let id: RecordId = "review:abc".parse()?`, build with
//! `RecordId::from_table_key("review", "abc")`, and pass `RecordId`
//! directly to `db.select()` / `db.update()` / `db.delete()`.

pub mod category;
pub mod field_staff;
pub mod location;
pub mod review;
pub mod settings;

pub use category::ProductCategoryRepository;
pub use field_staff::FieldStaffRepository;
pub use location::LocationRepository;
pub use review::ReviewRepository;
pub use settings::SiteSettingsRepository;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;
use thiserror::Error;

/// Repository error types
#[derive(Debug, Error)]
pub enum RepoError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<surrealdb::Error> for RepoError {
    fn from(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        // Unique index rejections arrive as plain query errors; keep them
        // distinguishable so write paths can re-run slug resolution.
        if msg.contains("already contains") {
            RepoError::Duplicate(msg)
        } else {
            RepoError::Database(msg)
        }
    }
}

impl RepoError {
    /// True when a write was rejected by a unique index
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, RepoError::Duplicate(_))
    }
}

/// Result type for repository operations
pub type RepoResult<T> = Result<T, RepoError>;

/// Base repository with database reference
#[derive(Clone)]
pub struct BaseRepository {
    db: Surreal<Db>,
}

impl BaseRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self { db }
    }

    pub fn db(&self) -> &Surreal<Db> {
        &self.db
    }
}
