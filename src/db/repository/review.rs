//! Review Repository

use super::{BaseRepository, RepoError, RepoResult};
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};
use crate::geo::bounds::{GeoBounds, usable_coordinates};
use crate::seo::slug::SlugStore;
use crate::utils::time::now_rfc3339;
use surrealdb::engine::local::Db;
use surrealdb::{RecordId, Surreal};

#[derive(Clone)]
pub struct ReviewRepository {
    base: BaseRepository,
}

impl ReviewRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Find all reviews, newest first
    pub async fn find_all(&self) -> RepoResult<Vec<Review>> {
        let reviews: Vec<Review> = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY created_at DESC")
            .await?
            .take(0)?;
        Ok(reviews)
    }

    /// Find review by id
    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Review>> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let review: Option<Review> = self.base.db().select(thing).await?;
        Ok(review)
    }

    /// Find review by slug
    pub async fn find_by_slug(&self, slug: &str) -> RepoResult<Option<Review>> {
        let slug_owned = slug.to_string();
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM review WHERE slug = $slug LIMIT 1")
            .bind(("slug", slug_owned))
            .await?;
        let reviews: Vec<Review> = result.take(0)?;
        Ok(reviews.into_iter().next())
    }

    /// Check whether a slug is taken, optionally ignoring one record (edits)
    pub async fn slug_taken(
        &self,
        candidate: &str,
        exclude: Option<&RecordId>,
    ) -> RepoResult<bool> {
        let slug_owned = candidate.to_string();
        let mut result = match exclude {
            Some(id) => {
                self.base
                    .db()
                    .query("SELECT VALUE id FROM review WHERE slug = $slug AND id != $exclude LIMIT 1")
                    .bind(("slug", slug_owned))
                    .bind(("exclude", id.clone()))
                    .await?
            }
            None => {
                self.base
                    .db()
                    .query("SELECT VALUE id FROM review WHERE slug = $slug LIMIT 1")
                    .bind(("slug", slug_owned))
                    .await?
            }
        };
        let hits: Vec<RecordId> = result.take(0)?;
        Ok(!hits.is_empty())
    }

    /// Create a review with a resolved slug
    ///
    /// A concurrent writer can still take the slug between resolution and
    /// this write; the unique index then rejects with [`RepoError::Duplicate`]
    /// and the caller re-resolves.
    pub async fn create(&self, data: ReviewCreate, slug: String) -> RepoResult<Review> {
        let is_published = data.is_published.unwrap_or(false);
        let mut result = self
            .base
            .db()
            .query(
                r#"CREATE review SET
                    slug = $slug,
                    customer_salutation = $customer_salutation,
                    customer_lastname = $customer_lastname,
                    city = $city,
                    postal_code = $postal_code,
                    product_category = $product_category,
                    installation_date = $installation_date,
                    title = $title,
                    text = $text,
                    street = $street,
                    rating = $rating,
                    rating_consulting = $rating_consulting,
                    rating_installation = $rating_installation,
                    rating_cleanliness = $rating_cleanliness,
                    rating_value = $rating_value,
                    images = $images,
                    is_published = $is_published,
                    created_at = $now,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("slug", slug))
            .bind(("customer_salutation", data.customer_salutation))
            .bind(("customer_lastname", data.customer_lastname))
            .bind(("city", data.city))
            .bind(("postal_code", data.postal_code))
            .bind(("product_category", data.product_category))
            .bind(("installation_date", data.installation_date))
            .bind(("title", data.title))
            .bind(("text", data.text))
            .bind(("street", data.street))
            .bind(("rating", data.rating))
            .bind(("rating_consulting", data.rating_consulting))
            .bind(("rating_installation", data.rating_installation))
            .bind(("rating_cleanliness", data.rating_cleanliness))
            .bind(("rating_value", data.rating_value))
            .bind(("images", data.images))
            .bind(("is_published", is_published))
            .bind(("now", now_rfc3339()))
            .await?;

        let created: Option<Review> = result.take(0)?;
        created.ok_or_else(|| RepoError::Database("Failed to create review".to_string()))
    }

    /// Update a review, optionally swapping in a regenerated slug
    pub async fn update(
        &self,
        id: &str,
        data: ReviewUpdate,
        new_slug: Option<String>,
    ) -> RepoResult<Review> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        // Slug swap first so a unique-index rejection aborts before the merge
        self.base
            .db()
            .query(
                r#"UPDATE $thing SET
                    slug = IF $has_slug THEN $new_slug ELSE slug END,
                    updated_at = $now"#,
            )
            .bind(("thing", thing.clone()))
            .bind(("has_slug", new_slug.is_some()))
            .bind(("new_slug", new_slug))
            .bind(("now", now_rfc3339()))
            .await?
            .check()?;

        let updated: Option<Review> = self.base.db().update(thing).merge(data).await?;
        updated.ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    /// Set the moderation flag
    pub async fn set_published(&self, id: &str, is_published: bool) -> RepoResult<Review> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        let mut result = self
            .base
            .db()
            .query(
                "UPDATE $thing SET is_published = $is_published, updated_at = $now RETURN AFTER",
            )
            .bind(("thing", thing))
            .bind(("is_published", is_published))
            .bind(("now", now_rfc3339()))
            .await?;
        result
            .take::<Option<Review>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    /// Store geocoded coordinates
    pub async fn set_coordinates(
        &self,
        id: &RecordId,
        latitude: f64,
        longitude: f64,
    ) -> RepoResult<Review> {
        let mut result = self
            .base
            .db()
            .query(
                r#"UPDATE $thing SET
                    latitude = $latitude,
                    longitude = $longitude,
                    updated_at = $now
                RETURN AFTER"#,
            )
            .bind(("thing", id.clone()))
            .bind(("latitude", latitude))
            .bind(("longitude", longitude))
            .bind(("now", now_rfc3339()))
            .await?;
        result
            .take::<Option<Review>>(0)?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))
    }

    /// Published reviews, newest first, optionally filtered by category/city
    pub async fn find_published(
        &self,
        category: Option<String>,
        city: Option<String>,
        limit: usize,
    ) -> RepoResult<Vec<Review>> {
        // LIMIT combined with WHERE + ORDER BY drops rows on the embedded
        // engine, so the limit is applied client-side.
        let mut result = self
            .base
            .db()
            .query(
                r#"SELECT * FROM review
                    WHERE is_published = true
                      AND ($category = NONE OR product_category = $category)
                      AND ($city = NONE OR city = $city)
                    ORDER BY created_at DESC"#,
            )
            .bind(("category", category))
            .bind(("city", city))
            .await?;
        let mut reviews: Vec<Review> = result.take(0)?;
        reviews.truncate(limit);
        Ok(reviews)
    }

    /// Reviews without usable coordinates, oldest first (geocoding backlog)
    pub async fn find_unresolved(
        &self,
        bounds: &GeoBounds,
        limit: usize,
    ) -> RepoResult<Vec<Review>> {
        let mut result = self
            .base
            .db()
            .query("SELECT * FROM review ORDER BY created_at ASC")
            .await?;
        let all: Vec<Review> = result.take(0)?;
        let mut pending: Vec<Review> = all
            .into_iter()
            .filter(|r| usable_coordinates(r.latitude, r.longitude, bounds).is_none())
            .collect();
        pending.truncate(limit);
        Ok(pending)
    }

    /// Hard delete a review
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        let thing: RecordId = id
            .parse()
            .map_err(|_| RepoError::Validation(format!("Invalid ID: {}", id)))?;
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Review {} not found", id)))?;

        self.base
            .db()
            .query("DELETE $thing")
            .bind(("thing", thing))
            .await?;
        Ok(true)
    }
}

impl SlugStore for ReviewRepository {
    async fn slug_exists(&self, candidate: &str, exclude: Option<&RecordId>) -> RepoResult<bool> {
        self.slug_taken(candidate, exclude).await
    }
}
