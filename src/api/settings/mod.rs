//! Site Settings API module

mod handler;

use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/settings", routes())
}

fn routes() -> Router<ServerState> {
    let read = Router::new().route("/", get(handler::get));
    // Mutations are reserved for the admin role
    let write = Router::new()
        .route("/", put(handler::update))
        .route_layer(middleware::from_fn(require_admin));
    read.merge(write)
}
