use std::path::{Path, PathBuf};

use crate::geo::GeoBounds;

/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | /var/lib/review-server | Working directory for database and logs |
/// | HTTP_PORT | 3000 | HTTP service port |
/// | ENVIRONMENT | development | development \| staging \| production |
/// | GEOCODER_BASE_URL | https://nominatim.openstreetmap.org | Nominatim-compatible endpoint |
/// | GEOCODING_DELAY_MS | 1100 | Pause between geocoder calls in a batch |
/// | GEOCODING_BATCH_LIMIT | 25 | Maximum reviews per geocoding run |
/// | GEO_MIN_LAT / GEO_MAX_LAT | 47.0 / 55.5 | Coordinate plausibility box |
/// | GEO_MIN_LNG / GEO_MAX_LNG | 5.5 / 15.5 | Coordinate plausibility box |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/data/reviews HTTP_PORT=8080 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory holding the database and log files
    pub work_dir: String,
    /// HTTP API service port
    pub http_port: u16,
    /// Runtime environment: development | staging | production
    pub environment: String,

    // === Geocoding ===
    /// Base URL of the Nominatim-compatible geocoder
    pub geocoder_base_url: String,
    /// Delay between consecutive geocoder calls (milliseconds)
    pub geocoding_delay_ms: u64,
    /// Maximum reviews processed per geocoding run
    pub geocoding_batch_limit: usize,
    /// Coordinate plausibility bounds for stored reviews
    pub geo_bounds: GeoBounds,
}

fn env_parse<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset variables fall back to their defaults.
    pub fn from_env() -> Self {
        let mut geo_bounds = GeoBounds::GERMANY;
        if let Some(v) = env_parse("GEO_MIN_LAT") {
            geo_bounds.min_lat = v;
        }
        if let Some(v) = env_parse("GEO_MAX_LAT") {
            geo_bounds.max_lat = v;
        }
        if let Some(v) = env_parse("GEO_MIN_LNG") {
            geo_bounds.min_lng = v;
        }
        if let Some(v) = env_parse("GEO_MAX_LNG") {
            geo_bounds.max_lng = v;
        }

        Self {
            work_dir: std::env::var("WORK_DIR").unwrap_or_else(|_| "/var/lib/review-server".into()),
            http_port: env_parse("HTTP_PORT").unwrap_or(3000),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            geocoder_base_url: std::env::var("GEOCODER_BASE_URL")
                .unwrap_or_else(|_| "https://nominatim.openstreetmap.org".into()),
            // Nominatim's public instance allows at most one request per second
            geocoding_delay_ms: env_parse("GEOCODING_DELAY_MS").unwrap_or(1100),
            geocoding_batch_limit: env_parse("GEOCODING_BATCH_LIMIT").unwrap_or(25),
            geo_bounds,
        }
    }

    /// Override selected values, useful in tests
    pub fn with_overrides(work_dir: impl Into<String>, http_port: u16) -> Self {
        let mut config = Self::from_env();
        config.work_dir = work_dir.into();
        config.http_port = http_port;
        config
    }

    /// Directory for the embedded database
    pub fn database_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("database")
    }

    /// Directory for log files
    pub fn logs_dir(&self) -> PathBuf {
        Path::new(&self.work_dir).join("logs")
    }

    /// Ensure the working directory layout exists
    pub fn ensure_work_dir_structure(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(self.database_dir())?;
        std::fs::create_dir_all(self.logs_dir())?;
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
