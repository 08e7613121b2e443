//! Startup schema
//!
//! Tables stay schemaless; the definitions here exist for the indexes.
//! The unique index on `review.slug` is load-bearing: it turns lost
//! check-then-insert races into query errors the write path can retry.

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

const STATEMENTS: &[&str] = &[
    "DEFINE TABLE IF NOT EXISTS review SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS uniq_review_slug ON TABLE review FIELDS slug UNIQUE",
    "DEFINE TABLE IF NOT EXISTS location SCHEMALESS",
    "DEFINE TABLE IF NOT EXISTS field_staff SCHEMALESS",
    "DEFINE TABLE IF NOT EXISTS product_category SCHEMALESS",
    "DEFINE INDEX IF NOT EXISTS uniq_category_name ON TABLE product_category FIELDS name UNIQUE",
    "DEFINE TABLE IF NOT EXISTS site_settings SCHEMALESS",
];

/// Apply all schema statements, surfacing the first statement-level error
pub async fn apply(db: &Surreal<Db>) -> surrealdb::Result<()> {
    for statement in STATEMENTS {
        db.query(*statement).await?.check()?;
    }
    Ok(())
}
