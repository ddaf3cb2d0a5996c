// ABOUTME: Input validation rules for catalog entities
// ABOUTME: Length, range and positivity checks applied before reaching storage

use rust_decimal::Decimal;
use thiserror::Error;

use crate::constants::{MAX_RATING, MAX_REVIEW_LEN, MIN_RATING, MIN_REVIEW_LEN};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{field} cannot be empty")]
    EmptyValue { field: &'static str },

    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },

    #[error("{field} must be at least {min} characters")]
    TooShort { field: &'static str, min: usize },

    #[error("{field} must be greater than 0")]
    NotPositive { field: &'static str },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
    },

    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: &'static str, value: String },
}

impl ValidationError {
    pub fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            value: value.into(),
        }
    }
}

/// Validate a required name-like field and return its trimmed form
pub fn validate_name(field: &'static str, value: &str, max: usize) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyValue { field });
    }
    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(trimmed.to_string())
}

/// Validate an optional free-text field against a maximum length
pub fn validate_optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<(), ValidationError> {
    match value {
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        _ => Ok(()),
    }
}

/// Prices must be strictly positive
pub fn validate_price(field: &'static str, price: Decimal) -> Result<(), ValidationError> {
    if price <= Decimal::ZERO {
        return Err(ValidationError::NotPositive { field });
    }
    Ok(())
}

/// Ratings are bounded to 0..=5
pub fn validate_rating(rating: i64) -> Result<(), ValidationError> {
    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::OutOfRange {
            field: "rating",
            min: MIN_RATING,
            max: MAX_RATING,
        });
    }
    Ok(())
}

pub fn validate_display_order(display_order: i64) -> Result<(), ValidationError> {
    if display_order < 0 {
        return Err(ValidationError::OutOfRange {
            field: "display_order",
            min: 0,
            max: i64::MAX,
        });
    }
    Ok(())
}

/// Review text is optional, but when present it is trimmed and must hold
/// between 10 and 2000 characters
pub fn validate_review_text(value: Option<&str>) -> Result<Option<String>, ValidationError> {
    let Some(text) = value else {
        return Ok(None);
    };

    let trimmed = text.trim();
    let len = trimmed.chars().count();
    if len < MIN_REVIEW_LEN {
        return Err(ValidationError::TooShort {
            field: "review_text",
            min: MIN_REVIEW_LEN,
        });
    }
    if len > MAX_REVIEW_LEN {
        return Err(ValidationError::TooLong {
            field: "review_text",
            max: MAX_REVIEW_LEN,
        });
    }
    Ok(Some(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_validate_name_trims() {
        assert_eq!(validate_name("name", "  Spring  ", 255).unwrap(), "Spring");
    }

    #[test]
    fn test_validate_name_rejects_blank() {
        let err = validate_name("name", "   ", 255).unwrap_err();
        assert_eq!(err, ValidationError::EmptyValue { field: "name" });
    }

    #[test]
    fn test_validate_name_rejects_long() {
        let long = "x".repeat(256);
        let err = validate_name("name", &long, 255).unwrap_err();
        assert_eq!(err, ValidationError::TooLong { field: "name", max: 255 });
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("price", Decimal::from_str("19.99").unwrap()).is_ok());
        assert!(validate_price("price", Decimal::ZERO).is_err());
        assert!(validate_price("price", Decimal::from_str("-1").unwrap()).is_err());
    }

    #[test]
    fn test_validate_rating_bounds() {
        assert!(validate_rating(0).is_ok());
        assert!(validate_rating(5).is_ok());
        assert!(validate_rating(-1).is_err());
        assert!(validate_rating(6).is_err());
    }

    #[test]
    fn test_validate_review_text() {
        assert_eq!(validate_review_text(None).unwrap(), None);
        assert!(validate_review_text(Some("too short")).is_err());
        assert_eq!(
            validate_review_text(Some("  Absolutely stunning.  ")).unwrap(),
            Some("Absolutely stunning.".to_string())
        );
    }

    #[test]
    fn test_validate_display_order() {
        assert!(validate_display_order(0).is_ok());
        assert!(validate_display_order(-3).is_err());
    }
}
