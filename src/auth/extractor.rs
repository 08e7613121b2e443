//! Identity extractor
//!
//! Handlers that need the acting user take [`CurrentUser`] as an argument.
//! The extractor reuses what [`require_identity`](crate::auth::require_identity)
//! stored and falls back to reading the proxy headers directly for routes
//! mounted without the middleware.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::security_log;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        // Check if already extracted (from middleware)
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        match CurrentUser::from_headers(&parts.headers) {
            Some(user) => {
                // Store in extensions for potential reuse
                parts.extensions.insert(user.clone());
                Ok(user)
            }
            None => {
                security_log!("WARN", "identity_missing", uri = format!("{:?}", parts.uri));
                Err(AppError::Unauthorized)
            }
        }
    }
}
