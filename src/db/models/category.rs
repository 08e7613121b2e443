//! Product Category Model

use super::serde_helpers;
use serde::{Deserialize, Serialize};
use surrealdb::RecordId;

/// FAQ entry attached to a product category
///
/// Question and answer may contain template placeholders; they are rendered
/// per review on the public detail page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FaqItem {
    pub question: String,
    pub answer: String,
}

/// Product category entity (SEO content per product line)
///
/// `name` is unique and matches `Review.product_category` by value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategory {
    #[serde(default, with = "serde_helpers::option_record_id")]
    pub id: Option<RecordId>,
    pub name: String,
    /// SEO description template
    #[serde(default)]
    pub seo_description: String,
    #[serde(default)]
    pub faqs: Vec<FaqItem>,
    #[serde(default = "default_true", deserialize_with = "serde_helpers::bool_true")]
    pub is_active: bool,
    #[serde(default)]
    pub display_order: i32,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

fn default_true() -> bool {
    true
}

/// Create product category payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductCategoryCreate {
    pub name: String,
    pub seo_description: Option<String>,
    #[serde(default)]
    pub faqs: Vec<FaqItem>,
    pub display_order: Option<i32>,
}

/// Update product category payload (partial)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductCategoryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub faqs: Option<Vec<FaqItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_order: Option<i32>,
}
