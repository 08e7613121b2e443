//! Display-location and contact-person resolution
//!
//! A published review page shows which branch handled the installation and
//! which staff member covers the customer's area. Both are derived, never
//! stored: locations by geographic distance with a default/first fallback
//! chain, field staff by postal-code prefix or range tokens.

use crate::db::models::{FieldStaff, Location};
use crate::geo::bounds::{GeoBounds, usable_coordinates};
use crate::geo::distance::haversine_km;

/// Nearest location by great-circle distance
///
/// Locations without a stored coordinate pair are skipped. Ties keep the
/// earlier entry, so callers passing a display-ordered list get a stable
/// result.
pub fn find_nearest_location<'a>(
    lat: f64,
    lng: f64,
    locations: &'a [Location],
) -> Option<&'a Location> {
    let mut best: Option<(&Location, f64)> = None;
    for location in locations {
        let (Some(loc_lat), Some(loc_lng)) = (location.latitude, location.longitude) else {
            continue;
        };
        let d = haversine_km(lat, lng, loc_lat, loc_lng);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((location, d)),
        }
    }
    best.map(|(location, _)| location)
}

/// Resolve the location shown on a review page
///
/// Three tiers: nearest location when the review has usable coordinates,
/// otherwise the first location flagged as default, otherwise the first
/// entry. `active_locations` must already be filtered to active entries and
/// sorted by display order; an empty slice yields `None`.
pub fn resolve_display_location<'a>(
    review_lat: Option<f64>,
    review_lng: Option<f64>,
    bounds: &GeoBounds,
    active_locations: &'a [Location],
) -> Option<&'a Location> {
    if let Some((lat, lng)) = usable_coordinates(review_lat, review_lng, bounds)
        && let Some(nearest) = find_nearest_location(lat, lng, active_locations)
    {
        return Some(nearest);
    }
    if let Some(default) = active_locations.iter().find(|l| l.is_default) {
        return Some(default);
    }
    active_locations.first()
}

/// Parsed postal-code assignment token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostalToken {
    /// Two-digit prefix, e.g. "96" covers 96000-96999
    Prefix(String),
    /// Inclusive two-digit range, e.g. "90-97"
    Range(u8, u8),
}

fn two_digits(s: &str) -> Option<u8> {
    if s.len() != 2 || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

/// Parse an assignment token, `None` for anything malformed
///
/// Accepted shapes are exactly `NN` and `NN-MM` with `NN <= MM`.
pub fn parse_postal_token(token: &str) -> Option<PostalToken> {
    match token.split_once('-') {
        Some((lo, hi)) => {
            let lo = two_digits(lo)?;
            let hi = two_digits(hi)?;
            (lo <= hi).then_some(PostalToken::Range(lo, hi))
        }
        None => {
            two_digits(token)?;
            Some(PostalToken::Prefix(token.to_string()))
        }
    }
}

/// Whether a postal code falls under an assignment token
///
/// Malformed tokens and codes that are too short to carry a two-digit
/// prefix never match.
pub fn is_postal_code_in_range(postal_code: &str, token: &str) -> bool {
    let Some(parsed) = parse_postal_token(token) else {
        return false;
    };
    match parsed {
        PostalToken::Prefix(prefix) => postal_code.starts_with(&prefix),
        PostalToken::Range(lo, hi) => match postal_code.get(..2).and_then(two_digits) {
            Some(n) => (lo..=hi).contains(&n),
            None => false,
        },
    }
}

/// First active staff member whose assignment covers the postal code
///
/// Input order is preserved, so a display-ordered list makes the first match
/// the primary contact.
pub fn find_field_staff_for_postal_code<'a>(
    postal_code: &str,
    staff: &'a [FieldStaff],
) -> Option<&'a FieldStaff> {
    staff.iter().filter(|s| s.is_active).find(|s| {
        s.assigned_postal_codes
            .iter()
            .any(|token| is_postal_code_in_range(postal_code, token))
    })
}

/// First malformed token in an assignment list, for write-path validation
pub fn first_invalid_postal_token(tokens: &[String]) -> Option<&str> {
    tokens
        .iter()
        .map(String::as_str)
        .find(|token| parse_postal_token(token).is_none())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn location(name: &str, lat: Option<f64>, lng: Option<f64>, is_default: bool) -> Location {
        Location {
            id: None,
            name: name.to_string(),
            street: String::new(),
            postal_code: String::new(),
            city: String::new(),
            latitude: lat,
            longitude: lng,
            phone: None,
            email: None,
            is_active: true,
            is_default,
            display_order: 0,
            created_at: None,
            updated_at: None,
        }
    }

    fn staff(name: &str, tokens: &[&str], is_active: bool) -> FieldStaff {
        FieldStaff {
            id: None,
            name: name.to_string(),
            role_title: None,
            phone: None,
            email: None,
            photo_url: None,
            assigned_postal_codes: tokens.iter().map(|t| t.to_string()).collect(),
            is_active,
            display_order: 0,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_nearest_location_picks_closest() {
        let locations = vec![
            location("Bamberg", Some(49.8988), Some(10.9028), false),
            location("Nürnberg", Some(49.4521), Some(11.0767), false),
        ];
        // Forchheim, between the two but closer to Bamberg
        let nearest = find_nearest_location(49.7197, 11.0581, &locations);
        assert_eq!(nearest.map(|l| l.name.as_str()), Some("Bamberg"));
    }

    #[test]
    fn test_nearest_location_skips_entries_without_coordinates() {
        let locations = vec![
            location("No coords", None, None, false),
            location("Bamberg", Some(49.8988), Some(10.9028), false),
        ];
        let nearest = find_nearest_location(49.9, 10.9, &locations);
        assert_eq!(nearest.map(|l| l.name.as_str()), Some("Bamberg"));
    }

    #[test]
    fn test_nearest_location_tie_keeps_first() {
        let locations = vec![
            location("First", Some(49.9), Some(10.9), false),
            location("Second", Some(49.9), Some(10.9), false),
        ];
        let nearest = find_nearest_location(49.9, 10.9, &locations);
        assert_eq!(nearest.map(|l| l.name.as_str()), Some("First"));
    }

    #[test]
    fn test_resolve_uses_nearest_when_coordinates_usable() {
        let locations = vec![
            location("Coburg", Some(50.2612), Some(10.9627), true),
            location("Bamberg", Some(49.8988), Some(10.9028), false),
        ];
        let resolved = resolve_display_location(
            Some(49.89),
            Some(10.89),
            &GeoBounds::GERMANY,
            &locations,
        );
        assert_eq!(resolved.map(|l| l.name.as_str()), Some("Bamberg"));
    }

    #[test]
    fn test_resolve_falls_back_to_default_without_coordinates() {
        let locations = vec![
            location("Coburg", Some(50.2612), Some(10.9627), false),
            location("Bamberg", Some(49.8988), Some(10.9028), true),
        ];
        let resolved = resolve_display_location(None, None, &GeoBounds::GERMANY, &locations);
        assert_eq!(resolved.map(|l| l.name.as_str()), Some("Bamberg"));
    }

    #[test]
    fn test_resolve_falls_back_to_first_without_default() {
        let locations = vec![
            location("Coburg", None, None, false),
            location("Bamberg", None, None, false),
        ];
        let resolved =
            resolve_display_location(Some(0.0), Some(0.0), &GeoBounds::GERMANY, &locations);
        assert_eq!(resolved.map(|l| l.name.as_str()), Some("Coburg"));
    }

    #[test]
    fn test_resolve_empty_list_is_none() {
        assert!(resolve_display_location(Some(49.9), Some(10.9), &GeoBounds::GERMANY, &[]).is_none());
    }

    #[test]
    fn test_resolve_out_of_bounds_coordinates_fall_back() {
        let locations = vec![
            location("Coburg", Some(50.2612), Some(10.9627), false),
            location("Bamberg", Some(49.8988), Some(10.9028), true),
        ];
        // Rome is closer to neither; bounds check sends it down the fallback
        let resolved = resolve_display_location(
            Some(41.9028),
            Some(12.4964),
            &GeoBounds::GERMANY,
            &locations,
        );
        assert_eq!(resolved.map(|l| l.name.as_str()), Some("Bamberg"));
    }

    #[test]
    fn test_parse_postal_token_accepts_prefix_and_range() {
        assert_eq!(
            parse_postal_token("96"),
            Some(PostalToken::Prefix("96".to_string()))
        );
        assert_eq!(parse_postal_token("90-97"), Some(PostalToken::Range(90, 97)));
        assert_eq!(parse_postal_token("00-99"), Some(PostalToken::Range(0, 99)));
    }

    #[test]
    fn test_parse_postal_token_rejects_malformed() {
        for token in ["9", "961", "ab", "96-", "-96", "97-90", "96-1", "9 6", ""] {
            assert_eq!(parse_postal_token(token), None, "token {token:?}");
        }
    }

    #[test]
    fn test_postal_prefix_matching() {
        assert!(is_postal_code_in_range("96047", "96"));
        assert!(!is_postal_code_in_range("95447", "96"));
    }

    #[test]
    fn test_postal_range_matching_is_inclusive() {
        assert!(is_postal_code_in_range("90402", "90-97"));
        assert!(is_postal_code_in_range("97070", "90-97"));
        assert!(!is_postal_code_in_range("89073", "90-97"));
        assert!(!is_postal_code_in_range("98527", "90-97"));
    }

    #[test]
    fn test_postal_matching_fails_closed() {
        assert!(!is_postal_code_in_range("96047", "bad"));
        assert!(!is_postal_code_in_range("9", "90-97"));
        assert!(!is_postal_code_in_range("", "96"));
    }

    #[test]
    fn test_staff_lookup_first_match_wins() {
        let list = vec![
            staff("Weber", &["90-97"], true),
            staff("Schmidt", &["96"], true),
        ];
        let found = find_field_staff_for_postal_code("96047", &list);
        assert_eq!(found.map(|s| s.name.as_str()), Some("Weber"));
    }

    #[test]
    fn test_staff_lookup_skips_inactive() {
        let list = vec![
            staff("Weber", &["96"], false),
            staff("Schmidt", &["96"], true),
        ];
        let found = find_field_staff_for_postal_code("96047", &list);
        assert_eq!(found.map(|s| s.name.as_str()), Some("Schmidt"));
    }

    #[test]
    fn test_staff_lookup_no_match() {
        let list = vec![staff("Weber", &["80-85"], true)];
        assert!(find_field_staff_for_postal_code("96047", &list).is_none());
    }

    #[test]
    fn test_first_invalid_postal_token() {
        let ok = vec!["96".to_string(), "90-97".to_string()];
        assert_eq!(first_invalid_postal_token(&ok), None);
        let bad = vec!["96".to_string(), "abc".to_string()];
        assert_eq!(first_invalid_postal_token(&bad), Some("abc"));
    }
}
