//! Field Staff API Handlers
//!
//! Postal assignment tokens are validated on every write; a malformed token
//! would otherwise never match and silently hide the staff member.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{FieldStaff, FieldStaffCreate, FieldStaffUpdate};
use crate::db::repository::FieldStaffRepository;
use crate::geo::first_invalid_postal_token;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
    validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/field-staff - all staff in display order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<FieldStaff>>> {
    let repo = FieldStaffRepository::new(state.db.clone());
    let staff = repo.find_all().await?;
    Ok(Json(staff))
}

/// GET /api/field-staff/{id} - single staff member
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<FieldStaff>> {
    let repo = FieldStaffRepository::new(state.db.clone());
    let member = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Field staff {} not found", id)))?;
    Ok(Json(member))
}

/// POST /api/field-staff - create staff member
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<FieldStaffCreate>,
) -> AppResult<Json<FieldStaff>> {
    validate_create(&payload)?;
    let repo = FieldStaffRepository::new(state.db.clone());
    let member = repo.create(payload).await?;
    Ok(Json(member))
}

/// PUT /api/field-staff/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<FieldStaffUpdate>,
) -> AppResult<Json<FieldStaff>> {
    validate_update(&payload)?;
    let repo = FieldStaffRepository::new(state.db.clone());
    let member = repo.update(&id, payload).await?;
    Ok(Json(member))
}

/// DELETE /api/field-staff/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = FieldStaffRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

fn validate_tokens(tokens: &[String]) -> AppResult<()> {
    if let Some(token) = first_invalid_postal_token(tokens) {
        return Err(AppError::validation(format!(
            "Invalid postal assignment token '{token}', expected 'NN' or 'NN-MM'"
        )));
    }
    Ok(())
}

fn validate_create(payload: &FieldStaffCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.role_title, "role_title", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.photo_url, "photo_url", MAX_URL_LEN)?;
    validate_tokens(&payload.assigned_postal_codes)?;
    Ok(())
}

fn validate_update(payload: &FieldStaffUpdate) -> AppResult<()> {
    if let Some(ref v) = payload.name {
        validate_required_text(v, "name", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.role_title, "role_title", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.photo_url, "photo_url", MAX_URL_LEN)?;
    if let Some(ref tokens) = payload.assigned_postal_codes {
        validate_tokens(tokens)?;
    }
    Ok(())
}
