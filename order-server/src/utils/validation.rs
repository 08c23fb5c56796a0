//! Input validation helpers
//!
//! Centralized text length constants and validation functions used by the
//! CRUD handlers. The store itself is schema-flexible, so all request
//! constraints live here.

use crate::utils::AppError;

// ── Text length limits ──────────────────────────────────────────────

/// Entity names: product, customer, feedback author, etc.
pub const MAX_NAME_LEN: usize = 200;

/// Notes, descriptions, feedback text, FAQ answers, contact messages
pub const MAX_TEXT_LEN: usize = 2000;

/// Short identifiers: phone numbers, subjects, materials, colors
pub const MAX_SHORT_TEXT_LEN: usize = 100;

/// Email addresses (RFC 5321)
pub const MAX_EMAIL_LEN: usize = 254;

/// URLs / image paths
pub const MAX_URL_LEN: usize = 2048;

// ── Validation helpers (CRUD handlers) ──────────────────────────────

/// Validate that a required string is non-empty and within the length limit.
pub fn validate_required_text(value: &str, field: &str, max_len: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
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

/// Validate that a monetary / count field is not negative.
pub fn validate_non_negative(value: f64, field: &str) -> Result<(), AppError> {
    if value < 0.0 {
        return Err(AppError::validation(format!("{field} must not be negative")));
    }
    Ok(())
}

/// Feedback ratings are constrained to the 1..=5 range.
pub fn validate_rating(rating: i32) -> Result<(), AppError> {
    if !(1..=5).contains(&rating) {
        return Err(AppError::validation(format!(
            "rating must be between 1 and 5 (got {rating})"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_text_rejects_blank() {
        assert!(validate_required_text("  ", "name", MAX_NAME_LEN).is_err());
        assert!(validate_required_text("Oak chair", "name", MAX_NAME_LEN).is_ok());
    }

    #[test]
    fn required_text_rejects_overlong() {
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(validate_required_text(&long, "name", MAX_NAME_LEN).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(validate_rating(0).is_err());
        assert!(validate_rating(1).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(6).is_err());
    }
}
