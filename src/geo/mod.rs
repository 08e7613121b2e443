//! Geographic assignment
//!
//! Distance math, plausibility bounds, display-location and field-staff
//! resolution, and the Nominatim geocoding client with its batch runner.

pub mod assign;
pub mod bounds;
pub mod distance;
pub mod geocode;

pub use assign::{
    PostalToken, find_field_staff_for_postal_code, find_nearest_location,
    first_invalid_postal_token, is_postal_code_in_range, parse_postal_token,
    resolve_display_location,
};
pub use bounds::{GeoBounds, usable_coordinates};
pub use distance::haversine_km;
pub use geocode::{
    BatchOptions, BatchReport, GeoPoint, GeocodeError, GeocodeRequest, Geocoder,
    NominatimGeocoder, run_batch,
};
