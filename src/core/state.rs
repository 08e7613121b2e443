use std::sync::Arc;
use std::time::Duration;

use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use crate::core::Config;
use crate::db::DbService;
use crate::geo::{BatchOptions, Geocoder, NominatimGeocoder};

/// Shared server state
///
/// Cloning is shallow: the database handle and geocoder are shared
/// references, so every handler gets the same instances.
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Embedded database (SurrealDB on RocksDB)
    pub db: Surreal<Db>,
    /// Address-to-coordinates resolver
    pub geocoder: Arc<dyn Geocoder>,
}

impl ServerState {
    /// Assemble state from already-initialized parts
    ///
    /// Production code goes through [`initialize()`](Self::initialize); tests
    /// use this directly to swap in a scripted geocoder.
    pub fn new(config: Config, db: Surreal<Db>, geocoder: Arc<dyn Geocoder>) -> Self {
        Self {
            config,
            db,
            geocoder,
        }
    }

    /// Initialize the server state
    ///
    /// Creates the working directory layout, opens the embedded database at
    /// `work_dir/database/reviews.db` and builds the Nominatim client.
    pub async fn initialize(config: &Config) -> anyhow::Result<Self> {
        config.ensure_work_dir_structure()?;

        let db_path = config.database_dir().join("reviews.db");
        let db_service = DbService::new(&db_path.to_string_lossy()).await?;

        let geocoder: Arc<dyn Geocoder> =
            Arc::new(NominatimGeocoder::new(&config.geocoder_base_url));

        Ok(Self::new(config.clone(), db_service.db, geocoder))
    }

    /// Get a database handle
    pub fn get_db(&self) -> Surreal<Db> {
        self.db.clone()
    }

    /// Batch settings for geocoding runs, derived from the configuration
    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions {
            limit: self.config.geocoding_batch_limit,
            delay: Duration::from_millis(self.config.geocoding_delay_ms),
        }
    }
}
