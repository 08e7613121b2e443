//! Identity handling
//!
//! Authentication itself lives in the reverse proxy in front of this server.
//! The proxy strips inbound `x-auth-*` headers and injects trusted ones after
//! login; this module reads them and enforces roles locally.

pub mod extractor;
pub mod identity;
pub mod middleware;

pub use identity::{CurrentUser, Role};
pub use middleware::{require_admin, require_identity};
