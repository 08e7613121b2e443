//! Review Server - customer review management for a regional installer
//!
//! # Overview
//!
//! Single-binary HTTP service, deployed behind an authenticating reverse
//! proxy, providing:
//!
//! - **HTTP API** (`api`): admin CRUD plus public showcase endpoints
//! - **Database** (`db`): embedded SurrealDB storage
//! - **Identity** (`auth`): proxy-header identity and role gating
//! - **Geo** (`geo`): location assignment, bounds checks, batch geocoding
//! - **SEO** (`seo`): slug resolution and placeholder templates
//!
//! # Module structure
//!
//! ```text
//! src/
//! ├── core/          # config, state, server
//! ├── auth/          # identity extraction, role middleware
//! ├── api/           # HTTP routes and handlers
//! ├── geo/           # distance, bounds, assignment, geocoding
//! ├── seo/           # slugs and templates
//! ├── db/            # database layer
//! └── utils/         # utility functions
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod geo;
pub mod seo;
pub mod utils;

// Re-export public types
pub use auth::{CurrentUser, Role};
pub use core::{Config, Server, ServerState};
pub use utils::{AppError, AppResult};

// Re-export logger functions
pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro - supports tracing format specifiers
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}

/// Load .env, prepare the log directory and initialize tracing
pub fn setup_environment() -> Result<(), Box<dyn std::error::Error>> {
    dotenv::dotenv().ok();

    let log_level = std::env::var("LOG_LEVEL").ok();
    let log_dir = std::env::var("LOG_DIR").ok();

    if let Some(dir) = &log_dir {
        std::fs::create_dir_all(dir)?;
    }

    init_logger_with_file(log_level.as_deref(), log_dir.as_deref());

    Ok(())
}

pub fn print_banner() {
    println!(
        r#"
    ____            _
   / __ \___ _   __(_)___ _      __
  / /_/ / _ \ | / / / _ \ | /| / /
 / _, _/  __/ |/ / /  __/ |/ |/ /
/_/ |_|\___/|___/_/\___/|__/|__/
   _____
  / ___/___  ______   _____  _____
  \__ \/ _ \/ ___/ | / / _ \/ ___/
 ___/ /  __/ /   | |/ /  __/ /
/____/\___/_/    |___/\___/_/
    "#
    );
}
