//! Public Showcase Handlers
//!
//! Assemble the public review pages: published reviews only, the nearest (or
//! fallback) business location, the field contact covering the customer's
//! postal code, and SEO copy rendered from the category templates.
//!
//! The customer street stays private; public responses carry only city and
//! postal code.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};

use crate::core::ServerState;
use crate::db::models::{FieldStaff, Location, Review};
use crate::db::repository::{
    FieldStaffRepository, LocationRepository, ProductCategoryRepository, ReviewRepository,
    SiteSettingsRepository,
};
use crate::geo::{find_field_staff_for_postal_code, resolve_display_location};
use crate::seo::{CustomerRef, ReviewContext, render};
use crate::utils::{AppError, AppResult};

const DEFAULT_LIMIT: usize = 20;
const MAX_LIMIT: usize = 100;

/// List filter query
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub category: Option<String>,
    pub city: Option<String>,
    pub limit: Option<usize>,
}

/// Public list entry
#[derive(Debug, Serialize)]
pub struct ReviewSummary {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub customer_salutation: String,
    pub customer_lastname: String,
    pub city: String,
    pub product_category: String,
    pub installation_date: String,
    pub rating: f64,
    pub images: Vec<String>,
}

impl From<Review> for ReviewSummary {
    fn from(review: Review) -> Self {
        Self {
            slug: review.slug,
            title: review.title,
            customer_salutation: review.customer_salutation,
            customer_lastname: review.customer_lastname,
            city: review.city,
            product_category: review.product_category,
            installation_date: review.installation_date,
            rating: review.rating,
            images: review.images,
        }
    }
}

/// Business location as shown on the public page
#[derive(Debug, Serialize)]
pub struct PublicLocation {
    pub name: String,
    pub street: String,
    pub postal_code: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl From<Location> for PublicLocation {
    fn from(location: Location) -> Self {
        Self {
            name: location.name,
            street: location.street,
            postal_code: location.postal_code,
            city: location.city,
            phone: location.phone,
            email: location.email,
        }
    }
}

/// Contact person as shown on the public page
#[derive(Debug, Serialize)]
pub struct PublicContact {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

impl From<FieldStaff> for PublicContact {
    fn from(staff: FieldStaff) -> Self {
        Self {
            name: staff.name,
            role_title: staff.role_title,
            phone: staff.phone,
            email: staff.email,
            photo_url: staff.photo_url,
        }
    }
}

/// FAQ entry after template rendering
#[derive(Debug, Serialize)]
pub struct RenderedFaq {
    pub question: String,
    pub answer: String,
}

/// Assembled public detail page
#[derive(Debug, Serialize)]
pub struct ReviewDetail {
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    pub customer_salutation: String,
    pub customer_lastname: String,
    pub city: String,
    pub postal_code: String,
    pub product_category: String,
    pub installation_date: String,
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_consulting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_installation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_cleanliness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_value: Option<f64>,
    pub images: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<PublicLocation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<PublicContact>,
    pub seo_description: String,
    pub faqs: Vec<RenderedFaq>,
}

/// GET /api/public/reviews - published reviews, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<Vec<ReviewSummary>>> {
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let repo = ReviewRepository::new(state.db.clone());
    let reviews = repo
        .find_published(query.category, query.city, limit)
        .await?;
    Ok(Json(reviews.into_iter().map(ReviewSummary::from).collect()))
}

/// GET /api/public/reviews/{slug} - assembled review detail page
pub async fn get_by_slug(
    State(state): State<ServerState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ReviewDetail>> {
    let reviews = ReviewRepository::new(state.db.clone());
    let review = reviews
        .find_by_slug(&slug)
        .await?
        .filter(|r| r.is_published)
        .ok_or_else(|| AppError::not_found(format!("Review '{}' not found", slug)))?;

    let locations = LocationRepository::new(state.db.clone()).find_active().await?;
    let staff = FieldStaffRepository::new(state.db.clone())
        .find_active()
        .await?;
    let settings = SiteSettingsRepository::new(state.db.clone())
        .get_or_create()
        .await?;
    let category = ProductCategoryRepository::new(state.db.clone())
        .find_by_name(&review.product_category)
        .await?;

    let location = resolve_display_location(
        review.latitude,
        review.longitude,
        &state.config.geo_bounds,
        &locations,
    )
    .cloned();
    let contact = find_field_staff_for_postal_code(&review.postal_code, &staff).cloned();

    let ctx = ReviewContext {
        category: &review.product_category,
        city: &review.city,
        postal_code: &review.postal_code,
        region: &settings.region_label,
        installation_date: &review.installation_date,
        customer: CustomerRef {
            salutation: &review.customer_salutation,
            lastname: &review.customer_lastname,
        },
        rating: review.rating,
    };

    // A review may reference a category that was since deleted; the page
    // then simply carries no SEO copy.
    let (seo_description, faqs) = match category {
        Some(cat) => (
            render(&cat.seo_description, &ctx),
            cat.faqs
                .iter()
                .map(|faq| RenderedFaq {
                    question: render(&faq.question, &ctx),
                    answer: render(&faq.answer, &ctx),
                })
                .collect(),
        ),
        None => (String::new(), Vec::new()),
    };

    Ok(Json(ReviewDetail {
        slug: review.slug,
        title: review.title,
        text: review.text,
        customer_salutation: review.customer_salutation,
        customer_lastname: review.customer_lastname,
        city: review.city,
        postal_code: review.postal_code,
        product_category: review.product_category,
        installation_date: review.installation_date,
        rating: review.rating,
        rating_consulting: review.rating_consulting,
        rating_installation: review.rating_installation,
        rating_cleanliness: review.rating_cleanliness,
        rating_value: review.rating_value,
        images: review.images,
        location: location.map(PublicLocation::from),
        contact: contact.map(PublicContact::from),
        seo_description,
        faqs,
    }))
}
