//! Review Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// Customer review entity
///
/// The slug is server-assigned and globally unique; it is never accepted
/// from a payload. Coordinates stay absent until the review is geocoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Review {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    /// SEO slug, unique across all reviews
    pub slug: String,
    /// "Herr" / "Frau" / "Familie"
    pub customer_salutation: String,
    pub customer_lastname: String,
    pub city: String,
    /// German five-digit postal code
    pub postal_code: String,
    /// Matches `ProductCategory.name` by value
    pub product_category: String,
    /// Installation date (YYYY-MM-DD)
    pub installation_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    /// Overall rating, 1.0 to 5.0
    pub rating: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_consulting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_installation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_cleanliness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_value: Option<f64>,
    /// Ordered object-store paths
    #[serde(default)]
    pub images: Vec<String>,
    /// Public endpoints only serve published reviews
    #[serde(default, deserialize_with = "serde_helpers::bool_false")]
    pub is_published: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Create review payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCreate {
    pub customer_salutation: String,
    pub customer_lastname: String,
    pub city: String,
    pub postal_code: String,
    pub product_category: String,
    /// Installation date (YYYY-MM-DD)
    pub installation_date: String,
    pub title: Option<String>,
    pub text: String,
    pub street: Option<String>,
    pub rating: f64,
    pub rating_consulting: Option<f64>,
    pub rating_installation: Option<f64>,
    pub rating_cleanliness: Option<f64>,
    pub rating_value: Option<f64>,
    #[serde(default)]
    pub images: Vec<String>,
    pub is_published: Option<bool>,
}

/// Update review payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_salutation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_lastname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub installation_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_consulting: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_installation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_cleanliness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<Vec<String>>,
}
