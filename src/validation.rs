// ABOUTME: Input validation applied at the route boundary before any data access
// ABOUTME: Required-field, email, and minimum-length checks shared by submission endpoints
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Reach+ Agency

//! Input validation for submission endpoints
//!
//! Validation errors surface to the caller before any data access happens.

use crate::errors::{AppError, AppResult};

/// Validate email format
///
/// Performs basic email validation (single '@' with non-empty local and
/// domain parts, domain contains a dot).
///
/// # Errors
///
/// Returns `AppError::InvalidFormat` if invalid
///
/// # Examples
/// ```
/// # use reach_portal_server::validation::validate_email;
/// assert!(validate_email("user@example.com").is_ok());
/// assert!(validate_email("invalid").is_err());
/// assert!(validate_email("@example.com").is_err());
/// ```
pub fn validate_email(email: &str) -> AppResult<()> {
    let mut parts = email.splitn(2, '@');
    let local = parts.next().unwrap_or_default();
    let domain = parts.next().unwrap_or_default();

    let valid = !local.is_empty()
        && !domain.is_empty()
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && !email.contains(char::is_whitespace);

    if valid {
        Ok(())
    } else {
        Err(AppError::new(
            crate::errors::ErrorCode::InvalidFormat,
            "Invalid email format",
        ))
    }
}

/// Validate that a required field is non-empty after trimming
///
/// # Errors
///
/// Returns `AppError::MissingRequiredField` naming the field
pub fn validate_required(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::missing_field(field));
    }
    Ok(())
}

/// Validate a minimum length after trimming
///
/// # Errors
///
/// Returns `AppError::InvalidInput` if shorter than `min`
pub fn validate_min_length(field: &str, value: &str, min: usize) -> AppResult<()> {
    if value.trim().len() < min {
        return Err(AppError::invalid_input(format!(
            "Field '{field}' must be at least {min} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorCode;

    #[test]
    fn test_email_validation() {
        assert!(validate_email("a@b.co").is_ok());
        assert!(validate_email("first.last@sub.example.com").is_ok());

        for bad in ["", "plain", "@example.com", "user@", "user@nodot", "a b@c.d"] {
            assert!(validate_email(bad).is_err(), "accepted: {bad}");
        }
    }

    #[test]
    fn test_required_fields() {
        assert!(validate_required("name", "Ada").is_ok());

        let err = validate_required("name", "   ").unwrap_err();
        assert_eq!(err.code, ErrorCode::MissingRequiredField);
    }

    #[test]
    fn test_min_length() {
        assert!(validate_min_length("message", "long enough text", 10).is_ok());
        assert!(validate_min_length("message", "short", 10).is_err());
    }
}
