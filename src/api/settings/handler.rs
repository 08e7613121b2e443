//! Site Settings API Handlers
//!
//! One settings record per deployment; GET materializes it with defaults on
//! first access.

use axum::{Json, extract::State};
use tracing::info;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{SiteSettings, SiteSettingsUpdate};
use crate::db::repository::SiteSettingsRepository;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_SHORT_TEXT_LEN, MAX_URL_LEN, validate_optional_text,
};
use crate::utils::AppResult;

/// GET /api/settings - the settings singleton
pub async fn get(State(state): State<ServerState>) -> AppResult<Json<SiteSettings>> {
    let repo = SiteSettingsRepository::new(state.db.clone());
    let settings = repo.get_or_create().await?;
    Ok(Json(settings))
}

/// PUT /api/settings - partial update of the singleton
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<SiteSettingsUpdate>,
) -> AppResult<Json<SiteSettings>> {
    validate_update(&payload)?;
    let repo = SiteSettingsRepository::new(state.db.clone());
    let settings = repo.update(payload).await?;
    info!(target: "audit", user = %user.name, "Site settings updated");
    Ok(Json(settings))
}

fn validate_update(payload: &SiteSettingsUpdate) -> AppResult<()> {
    validate_optional_text(&payload.company_name, "company_name", MAX_NAME_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_SHORT_TEXT_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.website, "website", MAX_URL_LEN)?;
    validate_optional_text(&payload.region_label, "region_label", MAX_SHORT_TEXT_LEN)?;
    Ok(())
}
