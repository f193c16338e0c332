//! Field-level validation shared by request payloads.
//!
//! The schema enforces the same bounds with `CHECK` constraints. Validating
//! here first lets handlers answer with a precise message.

use crate::errors::CoreError;

/// Implemented by every request payload that carries bounded fields.
pub trait Validate {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first offending field.
    fn validate(&self) -> Result<(), CoreError>;
}

/// Require `min..=max` characters.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the length is out of bounds.
pub fn require_length(field: &str, value: &str, min: usize, max: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len == 0 && min > 0 {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if len < min {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Bound an optional text field to `max` characters.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the value is too long.
pub fn require_max_length(field: &str, value: Option<&str>, max: usize) -> Result<(), CoreError> {
    match value {
        Some(v) => require_length(field, v, 0, max),
        None => Ok(()),
    }
}

/// Require `min..=max` for an integer score or year.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the value is out of range.
pub fn require_range(field: &str, value: i64, min: i64, max: i64) -> Result<(), CoreError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "{field} must be between {min} and {max}"
        )))
    }
}

/// Require a strictly positive number.
///
/// # Errors
///
/// Returns `CoreError::Validation` when the value is zero, negative or NaN.
pub fn require_positive(field: &str, value: f64) -> Result<(), CoreError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(CoreError::Validation(format!("{field} must be greater than 0")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("", false)]
    #[case("a", true)]
    #[case("abcde", true)]
    #[case("abcdef", false)]
    fn length_bounds(#[case] value: &str, #[case] ok: bool) {
        assert_eq!(require_length("name", value, 1, 5).is_ok(), ok);
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        assert!(require_length("name", "ééééé", 1, 5).is_ok());
    }

    #[rstest]
    #[case(-1, false)]
    #[case(0, true)]
    #[case(10, true)]
    #[case(11, false)]
    fn range_bounds(#[case] value: i64, #[case] ok: bool) {
        assert_eq!(require_range("reach_score", value, 0, 10).is_ok(), ok);
    }

    #[test]
    fn positive_rejects_zero_and_nan() {
        assert!(require_positive("target_value", 0.0).is_err());
        assert!(require_positive("target_value", f64::NAN).is_err());
        assert!(require_positive("target_value", 0.5).is_ok());
    }

    #[test]
    fn error_message_names_field() {
        let err = require_length("name", "", 1, 100).unwrap_err();
        assert_eq!(err.to_string(), "name must not be empty");
    }
}
