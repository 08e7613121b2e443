//! Great-circle distance

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance between two coordinate pairs in kilometers
pub fn haversine_km(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lng = (lng2 - lng1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_haversine_zero_distance() {
        assert!(haversine_km(49.8988, 10.9028, 49.8988, 10.9028) < 1e-9);
    }

    #[test]
    fn test_haversine_berlin_munich() {
        // Berlin center to Munich center, roughly 504 km
        let d = haversine_km(52.52, 13.405, 48.1374, 11.5755);
        assert!((d - 504.0).abs() < 5.0, "got {d}");
    }

    #[test]
    fn test_haversine_is_symmetric() {
        let a = haversine_km(52.52, 13.405, 48.1374, 11.5755);
        let b = haversine_km(48.1374, 11.5755, 52.52, 13.405);
        assert!((a - b).abs() < 1e-9);
    }
}
