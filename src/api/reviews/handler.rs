//! Review API Handlers
//!
//! Slugs are assigned server-side on create and regenerated on update only
//! when a seed field (category, lastname, city, installation year) changes.
//! The unique slug index closes the probe-then-write race: a lost race
//! surfaces as a duplicate error and the write re-runs slug resolution.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::Datelike;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{Review, ReviewCreate, ReviewUpdate};
use crate::db::repository::ReviewRepository;
use crate::geo::GeocodeRequest;
use crate::seo::{SlugSource, base_slug, ensure_unique, should_regenerate, slug_year};
use crate::utils::time::parse_date;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_TEXT_LEN, MAX_TITLE_LEN, MAX_URL_LEN,
    validate_optional_rating, validate_optional_text, validate_postal_code, validate_rating,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Attempts at claiming a slug before giving up with a conflict
const SLUG_ATTEMPTS: usize = 3;

/// GET /api/reviews - all reviews, newest first
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Review>>> {
    let repo = ReviewRepository::new(state.db.clone());
    let reviews = repo.find_all().await?;
    Ok(Json(reviews))
}

/// GET /api/reviews/{id} - single review
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;
    Ok(Json(review))
}

/// POST /api/reviews - create a review with a server-assigned slug
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ReviewCreate>,
) -> AppResult<Json<Review>> {
    validate_create(&payload)?;
    let installation = parse_date(&payload.installation_date)?;

    let repo = ReviewRepository::new(state.db.clone());
    let base = base_slug(
        &payload.product_category,
        &payload.customer_lastname,
        &payload.city,
        installation.year(),
    );

    for _ in 0..SLUG_ATTEMPTS {
        let slug = ensure_unique(&repo, &base, None).await?;
        match repo.create(payload.clone(), slug).await {
            Ok(review) => return Ok(Json(review)),
            // Lost the race for this slug, resolve again
            Err(e) if e.is_unique_violation() => continue,
            Err(e) => return Err(e.into()),
        }
    }

    warn!(
        "Gave up claiming a slug for base '{}' after {} attempts",
        base, SLUG_ATTEMPTS
    );
    Err(AppError::conflict(
        "Could not assign a unique slug, please retry",
    ))
}

/// PUT /api/reviews/{id} - partial update, slug regenerated on seed change
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ReviewUpdate>,
) -> AppResult<Json<Review>> {
    validate_update(&payload)?;

    let repo = ReviewRepository::new(state.db.clone());
    let existing = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;

    let old = SlugSource {
        category: &existing.product_category,
        lastname: &existing.customer_lastname,
        city: &existing.city,
        installation_year: slug_year(&existing.installation_date),
    };
    let category = payload
        .product_category
        .as_deref()
        .unwrap_or(&existing.product_category);
    let lastname = payload
        .customer_lastname
        .as_deref()
        .unwrap_or(&existing.customer_lastname);
    let city = payload.city.as_deref().unwrap_or(&existing.city);
    let date = payload
        .installation_date
        .as_deref()
        .unwrap_or(&existing.installation_date);
    let new = SlugSource {
        category,
        lastname,
        city,
        installation_year: slug_year(date),
    };

    if !should_regenerate(&old, &new) {
        let review = repo.update(&id, payload, None).await?;
        return Ok(Json(review));
    }

    let base = base_slug(category, lastname, city, new.installation_year);
    for _ in 0..SLUG_ATTEMPTS {
        let slug = ensure_unique(&repo, &base, existing.id.as_ref()).await?;
        match repo.update(&id, payload.clone(), Some(slug)).await {
            Ok(review) => return Ok(Json(review)),
            Err(e) if e.is_unique_violation() => continue,
            Err(e) => return Err(e.into()),
        }
    }

    warn!(
        "Gave up claiming a slug for base '{}' after {} attempts",
        base, SLUG_ATTEMPTS
    );
    Err(AppError::conflict(
        "Could not assign a unique slug, please retry",
    ))
}

/// DELETE /api/reviews/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ReviewRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    info!(target: "audit", user = %user.name, review = %id, "Review deleted");
    Ok(Json(result))
}

/// Moderation payload
#[derive(Debug, Deserialize)]
pub struct PublishPayload {
    pub is_published: bool,
}

/// PUT /api/reviews/{id}/publish - set the moderation flag
pub async fn set_published(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<PublishPayload>,
) -> AppResult<Json<Review>> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo.set_published(&id, payload.is_published).await?;
    info!(
        target: "audit",
        user = %user.name,
        review = %id,
        is_published = payload.is_published,
        "Review moderation changed"
    );
    Ok(Json(review))
}

/// POST /api/reviews/{id}/geocode - geocode a single review
pub async fn geocode(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Review>> {
    let repo = ReviewRepository::new(state.db.clone());
    let review = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Review {} not found", id)))?;
    let record_id = review
        .id
        .clone()
        .ok_or_else(|| AppError::internal("Stored review is missing its id"))?;

    let request = GeocodeRequest {
        street: review.street.clone(),
        postal_code: review.postal_code.clone(),
        city: review.city.clone(),
    };
    let point = state
        .geocoder
        .geocode(&request)
        .await
        .map_err(|e| AppError::internal(format!("Geocoding failed: {}", e)))?
        .ok_or_else(|| {
            AppError::not_found(format!(
                "No coordinates found for {} {}",
                review.postal_code, review.city
            ))
        })?;

    if !state.config.geo_bounds.contains(point.latitude, point.longitude) {
        return Err(AppError::validation(format!(
            "Geocoder answered with out-of-range coordinates ({}, {}), check the address",
            point.latitude, point.longitude
        )));
    }

    let updated = repo
        .set_coordinates(&record_id, point.latitude, point.longitude)
        .await?;
    Ok(Json(updated))
}

fn validate_create(payload: &ReviewCreate) -> AppResult<()> {
    validate_required_text(
        &payload.customer_salutation,
        "customer_salutation",
        MAX_SHORT_TEXT_LEN,
    )?;
    validate_required_text(&payload.customer_lastname, "customer_lastname", MAX_NAME_LEN)?;
    validate_required_text(&payload.city, "city", MAX_NAME_LEN)?;
    validate_postal_code(&payload.postal_code, "postal_code")?;
    validate_required_text(&payload.product_category, "product_category", MAX_NAME_LEN)?;
    validate_required_text(&payload.text, "text", MAX_TEXT_LEN)?;
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.street, "street", MAX_ADDRESS_LEN)?;
    validate_rating(payload.rating, "rating")?;
    validate_optional_rating(payload.rating_consulting, "rating_consulting")?;
    validate_optional_rating(payload.rating_installation, "rating_installation")?;
    validate_optional_rating(payload.rating_cleanliness, "rating_cleanliness")?;
    validate_optional_rating(payload.rating_value, "rating_value")?;
    for (index, image) in payload.images.iter().enumerate() {
        validate_required_text(image, &format!("images[{index}]"), MAX_URL_LEN)?;
    }
    Ok(())
}

fn validate_update(payload: &ReviewUpdate) -> AppResult<()> {
    if let Some(ref v) = payload.customer_salutation {
        validate_required_text(v, "customer_salutation", MAX_SHORT_TEXT_LEN)?;
    }
    if let Some(ref v) = payload.customer_lastname {
        validate_required_text(v, "customer_lastname", MAX_NAME_LEN)?;
    }
    if let Some(ref v) = payload.city {
        validate_required_text(v, "city", MAX_NAME_LEN)?;
    }
    if let Some(ref code) = payload.postal_code {
        validate_postal_code(code, "postal_code")?;
    }
    if let Some(ref v) = payload.product_category {
        validate_required_text(v, "product_category", MAX_NAME_LEN)?;
    }
    if let Some(ref date) = payload.installation_date {
        parse_date(date)?;
    }
    if let Some(ref v) = payload.text {
        validate_required_text(v, "text", MAX_TEXT_LEN)?;
    }
    validate_optional_text(&payload.title, "title", MAX_TITLE_LEN)?;
    validate_optional_text(&payload.street, "street", MAX_ADDRESS_LEN)?;
    if let Some(rating) = payload.rating {
        validate_rating(rating, "rating")?;
    }
    validate_optional_rating(payload.rating_consulting, "rating_consulting")?;
    validate_optional_rating(payload.rating_installation, "rating_installation")?;
    validate_optional_rating(payload.rating_cleanliness, "rating_cleanliness")?;
    validate_optional_rating(payload.rating_value, "rating_value")?;
    if let Some(ref images) = payload.images {
        for (index, image) in images.iter().enumerate() {
            validate_required_text(image, &format!("images[{index}]"), MAX_URL_LEN)?;
        }
    }
    Ok(())
}
