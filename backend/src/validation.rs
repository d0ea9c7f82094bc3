//! Input validation utilities for the backend service layer.
//!
//! Validators return the sanitized value on success so callers store exactly
//! what was checked.

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result, ValidationErrors};

pub const USERNAME_MIN_LEN: usize = 3;
pub const USERNAME_MAX_LEN: usize = 30;
pub const PASSWORD_MIN_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

/// Validates a username: trimmed, 3 to 30 characters.
///
/// # Examples
/// ```
/// use bill_desk::validation::validate_username;
///
/// assert_eq!(validate_username("  alice ").unwrap(), "alice");
/// assert!(validate_username("al").is_err());
/// ```
pub fn validate_username(username: &str) -> Result<String> {
    let username = sanitize_string(username);
    let len = username.chars().count();

    if len < USERNAME_MIN_LEN {
        return Err(field_error(
            "username",
            format!("Username must be at least {} characters long", USERNAME_MIN_LEN),
        ));
    }

    if len > USERNAME_MAX_LEN {
        return Err(field_error(
            "username",
            format!("Username must be at most {} characters long", USERNAME_MAX_LEN),
        ));
    }

    Ok(username)
}

/// Validates email format against `^[^\s@]+@[^\s@]+\.[^\s@]+$` after trimming.
pub fn validate_email(email: &str) -> Result<String> {
    let email = sanitize_string(email);

    if email.is_empty() {
        return Err(field_error("email", "Email cannot be empty"));
    }

    if !EMAIL_RE.is_match(&email) {
        return Err(field_error("email", "Please fill a valid email address"));
    }

    Ok(email)
}

/// Validates the plain password before hashing. Not trimmed.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(field_error(
            "password",
            format!("Password must be at least {} characters long", PASSWORD_MIN_LEN),
        ));
    }

    Ok(())
}

/// Validates an invoice amount: finite and not negative.
pub fn validate_amount(amount: f64) -> Result<f64> {
    if !amount.is_finite() {
        return Err(field_error("amount", "Amount must be a number"));
    }

    if amount < 0.0 {
        return Err(field_error("amount", "Amount cannot be negative"));
    }

    Ok(amount)
}

/// Sanitizes string input by trimming whitespace
pub fn sanitize_string(input: &str) -> String {
    input.trim().to_string()
}

/// Validates that a string is not empty after sanitization
///
/// # Returns
/// * `Ok(String)` with sanitized string
/// * `Err(Error)` if empty after sanitization
pub fn validate_required_string(input: &str, field_name: &str) -> Result<String> {
    let sanitized = sanitize_string(input);

    if sanitized.is_empty() {
        return Err(field_error(field_name, format!("{} is required", field_name)));
    }

    Ok(sanitized)
}

/// Merges the failures of several field checks into one error.
///
/// Validation errors are combined into a single field map. Any other error
/// is returned as-is, since it is not a client mistake.
pub fn merge_errors<I>(errors: I) -> Error
where
    I: IntoIterator<Item = Error>,
{
    let mut fields = HashMap::new();

    for error in errors {
        match error {
            Error::Validation(errors) => fields.extend(errors.fields()),
            other => return other,
        }
    }

    if fields.len() == 1 {
        if let Some((field, message)) = fields.drain().next() {
            return Error::Validation(ValidationErrors::Single { field, message });
        }
    }
    Error::Validation(ValidationErrors::Multiple { fields })
}

fn field_error(field: &str, message: impl Into<String>) -> Error {
    Error::Validation(ValidationErrors::single(field, message))
}
