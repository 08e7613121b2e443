//! Product Category API Handlers
//!
//! SEO descriptions and FAQ entries are stored as templates; length checks
//! here keep the rendered public pages within sane bounds.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{FaqItem, ProductCategory, ProductCategoryCreate, ProductCategoryUpdate};
use crate::db::repository::ProductCategoryRepository;
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TEMPLATE_LEN, validate_optional_text, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/categories - all categories in display order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<ProductCategory>>> {
    let repo = ProductCategoryRepository::new(state.db.clone());
    let categories = repo.find_all().await?;
    Ok(Json(categories))
}

/// GET /api/categories/{id} - single category
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProductCategory>> {
    let repo = ProductCategoryRepository::new(state.db.clone());
    let category = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Category {} not found", id)))?;
    Ok(Json(category))
}

/// POST /api/categories - create category (name must be unique)
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<ProductCategoryCreate>,
) -> AppResult<Json<ProductCategory>> {
    validate_create(&payload)?;
    let repo = ProductCategoryRepository::new(state.db.clone());
    let category = repo.create(payload).await?;
    Ok(Json(category))
}

/// PUT /api/categories/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<ProductCategoryUpdate>,
) -> AppResult<Json<ProductCategory>> {
    validate_update(&payload)?;
    let repo = ProductCategoryRepository::new(state.db.clone());
    let category = repo.update(&id, payload).await?;
    Ok(Json(category))
}

/// DELETE /api/categories/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = ProductCategoryRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

fn validate_faqs(faqs: &[FaqItem]) -> AppResult<()> {
    for (index, faq) in faqs.iter().enumerate() {
        validate_required_text(&faq.question, &format!("faqs[{index}].question"), MAX_TEMPLATE_LEN)?;
        validate_required_text(&faq.answer, &format!("faqs[{index}].answer"), MAX_TEMPLATE_LEN)?;
    }
    Ok(())
}

fn validate_create(payload: &ProductCategoryCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.seo_description, "seo_description", MAX_TEMPLATE_LEN)?;
    validate_faqs(&payload.faqs)?;
    Ok(())
}

fn validate_update(payload: &ProductCategoryUpdate) -> AppResult<()> {
    if let Some(ref v) = payload.name {
        validate_required_text(v, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.seo_description, "seo_description", MAX_TEMPLATE_LEN)?;
    if let Some(ref faqs) = payload.faqs {
        validate_faqs(faqs)?;
    }
    Ok(())
}
