//! Public showcase API module
//!
//! Read-only endpoints serving only published reviews; mounted under
//! `/api/public` which the identity middleware skips.

mod handler;

use axum::{Router, routing::get};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/public", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/reviews", get(handler::list))
        .route("/reviews/{slug}", get(handler::get_by_slug))
}
