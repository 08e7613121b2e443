//! Coordinate plausibility bounds
//!
//! Geocoders occasionally return hits on the wrong continent for misspelled
//! addresses. Every coordinate pair read from a review is checked against a
//! bounding box before it participates in distance math.

use serde::{Deserialize, Serialize};

/// Inclusive bounding box in decimal degrees
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct GeoBounds {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl GeoBounds {
    /// Germany including a margin for border towns
    pub const GERMANY: GeoBounds = GeoBounds {
        min_lat: 47.0,
        max_lat: 55.5,
        min_lng: 5.5,
        max_lng: 15.5,
    };

    pub fn contains(&self, lat: f64, lng: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat && lng >= self.min_lng && lng <= self.max_lng
    }
}

/// Extract a usable coordinate pair from optional review fields
///
/// Usable means present, not the (0, 0) null-island placeholder, and inside
/// the plausibility bounds. Anything else yields `None` and the caller falls
/// back to non-geographic resolution.
pub fn usable_coordinates(
    lat: Option<f64>,
    lng: Option<f64>,
    bounds: &GeoBounds,
) -> Option<(f64, f64)> {
    let lat = lat?;
    let lng = lng?;
    if lat == 0.0 && lng == 0.0 {
        return None;
    }
    if !bounds.contains(lat, lng) {
        return None;
    }
    Some((lat, lng))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_germany_bounds_accept_interior() {
        assert!(GeoBounds::GERMANY.contains(49.8988, 10.9028)); // Bamberg
        assert!(GeoBounds::GERMANY.contains(47.0, 5.5)); // inclusive edges
        assert!(GeoBounds::GERMANY.contains(55.5, 15.5));
    }

    #[test]
    fn test_germany_bounds_reject_exterior() {
        assert!(!GeoBounds::GERMANY.contains(41.9028, 12.4964)); // Rome
        assert!(!GeoBounds::GERMANY.contains(46.9, 10.0));
        assert!(!GeoBounds::GERMANY.contains(50.0, 16.0));
    }

    #[test]
    fn test_usable_coordinates_requires_both_fields() {
        let b = &GeoBounds::GERMANY;
        assert_eq!(usable_coordinates(None, None, b), None);
        assert_eq!(usable_coordinates(Some(49.9), None, b), None);
        assert_eq!(usable_coordinates(None, Some(10.9), b), None);
    }

    #[test]
    fn test_usable_coordinates_rejects_null_island() {
        assert_eq!(
            usable_coordinates(Some(0.0), Some(0.0), &GeoBounds::GERMANY),
            None
        );
    }

    #[test]
    fn test_usable_coordinates_rejects_out_of_bounds() {
        assert_eq!(
            usable_coordinates(Some(40.4168), Some(-3.7038), &GeoBounds::GERMANY),
            None
        );
    }

    #[test]
    fn test_usable_coordinates_passes_valid_pair() {
        assert_eq!(
            usable_coordinates(Some(49.8988), Some(10.9028), &GeoBounds::GERMANY),
            Some((49.8988, 10.9028))
        );
    }
}
