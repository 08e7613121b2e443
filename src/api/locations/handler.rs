//! Location API Handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{Location, LocationCreate, LocationUpdate};
use crate::db::repository::LocationRepository;
use crate::utils::validation::{
    MAX_ADDRESS_LEN, MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, validate_optional_text,
    validate_postal_code, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// GET /api/locations - all locations in display order
pub async fn list(State(state): State<ServerState>) -> AppResult<Json<Vec<Location>>> {
    let repo = LocationRepository::new(state.db.clone());
    let locations = repo.find_all().await?;
    Ok(Json(locations))
}

/// GET /api/locations/{id} - single location
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Location>> {
    let repo = LocationRepository::new(state.db.clone());
    let location = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Location {} not found", id)))?;
    Ok(Json(location))
}

/// POST /api/locations - create location
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<LocationCreate>,
) -> AppResult<Json<Location>> {
    validate_create(&payload)?;
    let repo = LocationRepository::new(state.db.clone());
    let location = repo.create(payload).await?;
    Ok(Json(location))
}

/// PUT /api/locations/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<LocationUpdate>,
) -> AppResult<Json<Location>> {
    validate_update(&payload)?;
    let repo = LocationRepository::new(state.db.clone());
    let location = repo.update(&id, payload).await?;
    Ok(Json(location))
}

/// DELETE /api/locations/{id} - hard delete
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<bool>> {
    let repo = LocationRepository::new(state.db.clone());
    let result = repo.delete(&id).await?;
    Ok(Json(result))
}

fn validate_create(payload: &LocationCreate) -> AppResult<()> {
    validate_required_text(&payload.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&payload.street, "street", MAX_ADDRESS_LEN)?;
    validate_postal_code(&payload.postal_code, "postal_code")?;
    validate_required_text(&payload.city, "city", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    Ok(())
}

fn validate_update(payload: &LocationUpdate) -> AppResult<()> {
    if let Some(ref v) = payload.name {
        validate_required_text(v, "name", MAX_NAME_LEN)?;
    }
    if let Some(ref v) = payload.street {
        validate_required_text(v, "street", MAX_ADDRESS_LEN)?;
    }
    if let Some(ref code) = payload.postal_code {
        validate_postal_code(code, "postal_code")?;
    }
    if let Some(ref v) = payload.city {
        validate_required_text(v, "city", MAX_NAME_LEN)?;
    }
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    Ok(())
}
