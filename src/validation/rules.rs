use chrono::NaiveDate;

use crate::models::submission::ISO_DATE_FORMAT;

/// Validate a required text field with a max length.
pub fn validate_required(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate an optional text field with a max length (empty is OK).
pub fn validate_optional(value: &str, field_name: &str, max_len: usize) -> Option<String> {
    let trimmed = value.trim();
    if !trimmed.is_empty() && trimmed.chars().count() > max_len {
        return Some(format!("{field_name} must be at most {max_len} characters"));
    }
    None
}

/// Validate a required `YYYY-MM-DD` date.
pub fn validate_iso_date(value: &str, field_name: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(format!("{field_name} is required"));
    }
    if NaiveDate::parse_from_str(trimmed, ISO_DATE_FORMAT).is_err() {
        return Some(format!("{field_name} must be a valid date (YYYY-MM-DD)"));
    }
    None
}

/// Parse a weight typed by the user. Empty input is `None`.
pub fn parse_weight(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|w| w.is_finite())
}

/// Validate an optional weight: numeric and non-negative when present.
pub fn validate_weight(value: &str, field_name: &str) -> Option<String> {
    if value.trim().is_empty() {
        return None;
    }
    match parse_weight(value) {
        None => Some(format!("{field_name} must be a number")),
        Some(w) if w < 0.0 => Some(format!("{field_name} cannot be negative")),
        Some(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_trims_and_limits() {
        assert_eq!(validate_required("   ", "Case number", 5).as_deref(), Some("Case number is required"));
        assert!(validate_required(" abc ", "Case number", 5).is_none());
        assert!(validate_required("abcdef", "Case number", 5).is_some());
    }

    #[test]
    fn iso_dates() {
        assert!(validate_iso_date("2024-03-15", "Received").is_none());
        assert!(validate_iso_date("15/03/2024", "Received").is_some());
        assert!(validate_iso_date("2024-02-30", "Received").is_some());
    }

    #[test]
    fn weights() {
        assert!(validate_weight("", "Gross weight").is_none());
        assert!(validate_weight("12.50", "Gross weight").is_none());
        assert_eq!(validate_weight("abc", "Gross weight").as_deref(), Some("Gross weight must be a number"));
        assert_eq!(validate_weight("-1", "Gross weight").as_deref(), Some("Gross weight cannot be negative"));
        assert!(validate_weight("NaN", "Gross weight").is_some());
    }
}
