//! # Validation Utilities
//!
//! Input validation helpers. Messages are user-facing.

/// Validate that a string is not empty (whitespace-only counts as empty).
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate maximum length, counted in characters rather than bytes.
pub fn validate_max_length(value: &str, max: usize, field_name: &str) -> Result<(), String> {
    if value.chars().count() > max {
        Err(format!("{} must be at most {} characters", field_name, max))
    } else {
        Ok(())
    }
}

/// Parse a decimal integer, tolerating surrounding whitespace.
pub fn parse_int(value: &str) -> Option<i64> {
    value.trim().parse::<i64>().ok()
}
