//! API routes
//!
//! # Structure
//!
//! - [`health`] - health checks
//! - [`reviews`] - review management
//! - [`locations`] - business location management
//! - [`field_staff`] - field staff management
//! - [`categories`] - product category management
//! - [`settings`] - site settings singleton
//! - [`geocoding`] - batch geocoding runs
//! - [`showcase`] - public read-only review endpoints

pub mod categories;
pub mod field_staff;
pub mod geocoding;
pub mod health;
pub mod locations;
pub mod reviews;
pub mod settings;
pub mod showcase;

use axum::{Router, middleware};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;

use crate::auth::require_identity;
use crate::core::ServerState;

/// HTTP request logging middleware
async fn log_request(
    request: axum::extract::Request,
    next: middleware::Next,
) -> axum::response::Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    let status = response.status();

    tracing::info!(target: "http_access", "{} {} {}", method, uri, status);

    response
}

/// Build the application router with all middleware attached
pub fn build_app(state: ServerState) -> Router {
    Router::<ServerState>::new()
        // Public routes
        .merge(health::router())
        .merge(showcase::router())
        // Admin APIs
        .merge(reviews::router())
        .merge(locations::router())
        .merge(field_staff::router())
        .merge(categories::router())
        .merge(settings::router())
        .merge(geocoding::router())
        // Identity middleware skips public routes internally
        .layer(middleware::from_fn(require_identity))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(middleware::from_fn(log_request))
}
