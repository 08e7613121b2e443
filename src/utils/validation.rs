//! Input validation helpers
//!
//! Centralized text length constants and validation functions.
//! SurrealDB string fields carry no built-in length enforcement, so every
//! handler-level write goes through these checks.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: location, field staff, product category, company
pub const MAX_NAME_LEN: usize = 200;

/// Review titles
pub const MAX_TITLE_LEN: usize = 300;

/// Review body text
pub const MAX_TEXT_LEN: usize = 10_000;

/// SEO description / FAQ template text
pub const MAX_TEMPLATE_LEN: usize = 5_000;

/// Short identifiers: phone, salutation, region label, role title
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

/// Street addresses
pub const MAX_ADDRESS_LEN: usize = 500;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} must not be empty")));
    }
    if value.len() > max_len {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            value.len()
        )));
    }
    Ok(())
}

/// Validate that an optional string, if present, is within the length limit.
pub fn validate_optional_text(
    value: &Option<String>,
    field: &str,
    max_len: usize,
) -> Result<(), AppError> {
    if let Some(v) = value
        && v.len() > max_len
    {
        return Err(AppError::validation(format!(
            "{field} is too long ({} chars, max {max_len})",
            v.len()
        )));
    }
    Ok(())
}

// ── Domain validation helpers ───────────────────────────────────────

/// Validate a German postal code (exactly five ASCII digits).
pub fn validate_postal_code(code: &str, field: &str) -> Result<(), AppError> {
    if code.len() != 5 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::validation(format!(
            "{field} must be a five-digit postal code, got '{code}'"
        )));
    }
    Ok(())
}

/// Validate a rating value (1.0 to 5.0 inclusive).
pub fn validate_rating(value: f64, field: &str) -> Result<(), AppError> {
    if !value.is_finite() || !(1.0..=5.0).contains(&value) {
        return Err(AppError::validation(format!(
            "{field} must be between 1.0 and 5.0, got {value}"
        )));
    }
    Ok(())
}

/// Validate an optional rating value, if present.
pub fn validate_optional_rating(value: Option<f64>, field: &str) -> Result<(), AppError> {
    match value {
        Some(v) => validate_rating(v, field),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text_rejects_empty_and_whitespace() {
        assert!(validate_required_text("", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("   ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Müller", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn test_required_text_enforces_length() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn test_optional_text_allows_none() {
        assert!(validate_optional_text(&None, "title", MAX_TITLE_LEN).is_ok());
        let long = Some("x".repeat(MAX_TITLE_LEN + 1));
        assert!(validate_optional_text(&long, "title", MAX_TITLE_LEN).is_err());
    }

    #[test]
    fn test_postal_code_format() {
        assert!(validate_postal_code("96047", "postal_code").is_ok());
        assert!(validate_postal_code("9604", "postal_code").is_err());
        assert!(validate_postal_code("960477", "postal_code").is_err());
        assert!(validate_postal_code("96O47", "postal_code").is_err());
    }

    #[test]
    fn test_rating_bounds() {
        assert!(validate_rating(1.0, "rating").is_ok());
        assert!(validate_rating(5.0, "rating").is_ok());
        assert!(validate_rating(4.5, "rating").is_ok());
        assert!(validate_rating(0.9, "rating").is_err());
        assert!(validate_rating(5.1, "rating").is_err());
        assert!(validate_rating(f64::NAN, "rating").is_err());
    }

    #[test]
    fn test_optional_rating_allows_none() {
        assert!(validate_optional_rating(None, "rating_consulting").is_ok());
        assert!(validate_optional_rating(Some(3.0), "rating_consulting").is_ok());
        assert!(validate_optional_rating(Some(0.0), "rating_consulting").is_err());
    }
}
