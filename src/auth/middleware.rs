//! Identity middleware
//!
//! Attaches the proxy-asserted [`CurrentUser`] to admin API requests and
//! enforces role checks where routes opt in.

use axum::{extract::Request, http::Method, middleware::Next, response::Response};

use crate::AppError;
use crate::auth::CurrentUser;
use crate::security_log;

/// Require a proxy-asserted identity
///
/// On success the [`CurrentUser`] is stored in the request extensions
/// (`req.extensions_mut().insert(user)`).
///
/// # Paths that skip the check
///
/// - `OPTIONS *` (CORS preflight)
/// - anything outside `/api/`
/// - `/api/public/*` (showcase endpoints)
pub async fn require_identity(mut req: Request, next: Next) -> Result<Response, AppError> {
    let path = req.uri().path();

    if req.method() == Method::OPTIONS {
        return Ok(next.run(req).await);
    }
    if !path.starts_with("/api/") {
        return Ok(next.run(req).await);
    }
    if path.starts_with("/api/public/") {
        return Ok(next.run(req).await);
    }

    match CurrentUser::from_headers(req.headers()) {
        Some(user) => {
            req.extensions_mut().insert(user);
            Ok(next.run(req).await)
        }
        None => {
            security_log!("WARN", "identity_missing", uri = format!("{:?}", req.uri()));
            Err(AppError::Unauthorized)
        }
    }
}

/// Require the admin role
///
/// Layered behind [`require_identity`]; non-admins get 403 Forbidden.
pub async fn require_admin(req: Request, next: Next) -> Result<Response, AppError> {
    let user = req
        .extensions()
        .get::<CurrentUser>()
        .ok_or(AppError::Unauthorized)?;
    if !user.is_admin() {
        security_log!(
            "WARN",
            "admin_required",
            user_id = user.id.clone(),
            user_name = user.name.clone(),
            user_role = user.role.as_str()
        );
        return Err(AppError::forbidden("Administrator role required"));
    }

    Ok(next.run(req).await)
}
