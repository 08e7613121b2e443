//! Address geocoding
//!
//! Reviews store street-level addresses; the public pages need coordinates.
//! A `Geocoder` turns an address into an optional hit, and `run_batch`
//! sweeps reviews without usable coordinates through it with a delay between
//! requests to respect the upstream rate limit.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::db::repository::{RepoResult, ReviewRepository};
use crate::geo::bounds::GeoBounds;

/// Address fields submitted to the geocoder
#[derive(Debug, Clone)]
pub struct GeocodeRequest {
    pub street: Option<String>,
    pub postal_code: String,
    pub city: String,
}

/// A resolved coordinate pair
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    #[error("Geocoding request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Unexpected geocoder payload: {0}")]
    Payload(String),
}

/// Address-to-coordinates lookup
///
/// `Ok(None)` means the service answered but found nothing; errors are
/// reserved for transport and payload failures.
#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, request: &GeocodeRequest) -> Result<Option<GeoPoint>, GeocodeError>;
}

/// Nominatim search result, coordinates arrive as strings
#[derive(Debug, Deserialize)]
struct NominatimHit {
    lat: String,
    lon: String,
}

impl NominatimHit {
    fn into_point(self) -> Result<GeoPoint, GeocodeError> {
        let latitude = self
            .lat
            .parse()
            .map_err(|_| GeocodeError::Payload(format!("non-numeric latitude {:?}", self.lat)))?;
        let longitude = self
            .lon
            .parse()
            .map_err(|_| GeocodeError::Payload(format!("non-numeric longitude {:?}", self.lon)))?;
        Ok(GeoPoint {
            latitude,
            longitude,
        })
    }
}

/// Geocoder backed by a Nominatim-compatible search endpoint
#[derive(Debug, Clone)]
pub struct NominatimGeocoder {
    client: reqwest::Client,
    base_url: String,
}

impl NominatimGeocoder {
    pub fn new(base_url: &str) -> Self {
        // Nominatim's usage policy requires an identifying user agent
        let client = reqwest::Client::builder()
            .user_agent(concat!("review-server/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl Geocoder for NominatimGeocoder {
    async fn geocode(&self, request: &GeocodeRequest) -> Result<Option<GeoPoint>, GeocodeError> {
        let url = format!("{}/search", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("format", "json".to_string()),
            ("limit", "1".to_string()),
            ("countrycodes", "de".to_string()),
            ("postalcode", request.postal_code.clone()),
            ("city", request.city.clone()),
        ];
        if let Some(ref street) = request.street {
            query.push(("street", street.clone()));
        }

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(GeocodeError::Payload(format!(
                "geocoder answered with status {status}"
            )));
        }

        let hits: Vec<NominatimHit> = response.json().await?;
        match hits.into_iter().next() {
            Some(hit) => hit.into_point().map(Some),
            None => Ok(None),
        }
    }
}

/// Batch sweep settings
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Maximum reviews processed per run
    pub limit: usize,
    /// Pause between consecutive geocoder calls
    pub delay: Duration,
}

/// Outcome counters for one batch run
#[derive(Debug, Default, Clone, Serialize, PartialEq, Eq)]
pub struct BatchReport {
    pub scanned: usize,
    pub geocoded: usize,
    pub out_of_bounds: usize,
    pub unresolved: usize,
    pub failed: usize,
}

/// Geocode reviews that lack usable coordinates
///
/// Per-review geocoder failures are counted and the sweep continues; only
/// storage errors abort the run. Hits outside the plausibility bounds are
/// discarded rather than stored.
pub async fn run_batch(
    reviews: &ReviewRepository,
    geocoder: &dyn Geocoder,
    bounds: &GeoBounds,
    options: &BatchOptions,
) -> RepoResult<BatchReport> {
    let pending = reviews.find_unresolved(bounds, options.limit).await?;
    let mut report = BatchReport {
        scanned: pending.len(),
        ..Default::default()
    };

    for (index, review) in pending.iter().enumerate() {
        if index > 0 && !options.delay.is_zero() {
            tokio::time::sleep(options.delay).await;
        }

        let Some(id) = review.id.as_ref() else {
            continue;
        };
        let request = GeocodeRequest {
            street: review.street.clone(),
            postal_code: review.postal_code.clone(),
            city: review.city.clone(),
        };

        match geocoder.geocode(&request).await {
            Ok(Some(point)) if bounds.contains(point.latitude, point.longitude) => {
                reviews
                    .set_coordinates(id, point.latitude, point.longitude)
                    .await?;
                report.geocoded += 1;
            }
            Ok(Some(point)) => {
                warn!(
                    "Discarding out-of-bounds geocoder hit ({}, {}) for {} {}",
                    point.latitude, point.longitude, request.postal_code, request.city
                );
                report.out_of_bounds += 1;
            }
            Ok(None) => {
                report.unresolved += 1;
            }
            Err(e) => {
                warn!(
                    "Geocoding failed for {} {}: {}",
                    request.postal_code, request.city, e
                );
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_parses_nominatim_payload() {
        let json = r#"[{"place_id":12345,"lat":"49.8988135","lon":"10.9027636","display_name":"Bamberg"}]"#;
        let hits: Vec<NominatimHit> = serde_json::from_str(json).unwrap();
        let point = hits.into_iter().next().unwrap().into_point().unwrap();
        assert!((point.latitude - 49.8988135).abs() < 1e-9);
        assert!((point.longitude - 10.9027636).abs() < 1e-9);
    }

    #[test]
    fn test_hit_rejects_non_numeric_coordinates() {
        let hit = NominatimHit {
            lat: "not-a-number".to_string(),
            lon: "10.9".to_string(),
        };
        assert!(matches!(hit.into_point(), Err(GeocodeError::Payload(_))));
    }

    #[test]
    fn test_empty_result_set_deserializes() {
        let hits: Vec<NominatimHit> = serde_json::from_str("[]").unwrap();
        assert!(hits.is_empty());
    }
}
