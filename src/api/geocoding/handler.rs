//! Geocoding API Handlers
//!
//! The batch run executes inline within the request; with the configured
//! inter-request delay a full run over the default limit stays well under
//! typical proxy timeouts.

use axum::{Json, extract::State};
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::repository::ReviewRepository;
use crate::geo::{BatchReport, run_batch};
use crate::utils::AppResult;

/// Batch run payload, `{}` accepts the configured defaults
#[derive(Debug, Default, Deserialize)]
pub struct RunPayload {
    pub limit: Option<usize>,
}

/// POST /api/geocoding/run - geocode reviews lacking usable coordinates
pub async fn run(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<RunPayload>,
) -> AppResult<Json<BatchReport>> {
    let mut options = state.batch_options();
    if let Some(limit) = payload.limit {
        options.limit = limit;
    }

    let repo = ReviewRepository::new(state.db.clone());
    let report = run_batch(
        &repo,
        state.geocoder.as_ref(),
        &state.config.geo_bounds,
        &options,
    )
    .await?;

    info!(
        target: "audit",
        user = %user.name,
        scanned = report.scanned,
        geocoded = report.geocoded,
        out_of_bounds = report.out_of_bounds,
        unresolved = report.unresolved,
        failed = report.failed,
        "Geocoding batch finished"
    );
    Ok(Json(report))
}
