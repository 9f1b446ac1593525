//! Rules used by the `#[derive(Validate)]` request DTOs that the built-in validators do not
//! cover, plus `email` for addresses that arrive outside a DTO (query strings, path
//! segments).

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;
use validator::{ValidateEmail, ValidationError};

use crate::server::error::AppError;

/// Exactly eleven digits.
pub static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{11}$").expect("phone regex is valid"));

/// Three letter currency code, case-insensitive.
pub static CURRENCY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[A-Za-z]{3}\s*$").expect("currency regex is valid"));

fn invalid(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

/// Rejects strings that are empty once trimmed.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(invalid("blank", "value cannot be blank"));
    }
    Ok(())
}

/// 8 to 30 characters with at least one lowercase letter, one uppercase letter and one digit.
pub fn password_strength(value: &str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    let strong = value.chars().any(|c| c.is_ascii_lowercase())
        && value.chars().any(|c| c.is_ascii_uppercase())
        && value.chars().any(|c| c.is_ascii_digit());

    if !(8..=30).contains(&len) || !strong {
        return Err(invalid(
            "password",
            "password must be 8-30 characters and contain upper and lower case letters and a digit",
        ));
    }
    Ok(())
}

/// Empty strings pass (they clear the field); anything else must be an absolute http(s) URL.
pub fn http_url(value: &str) -> Result<(), ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Ok(());
    }

    match url::Url::parse(value) {
        Ok(parsed) if matches!(parsed.scheme(), "http" | "https") => Ok(()),
        _ => Err(invalid("url", "must be a valid http(s) URL")),
    }
}

/// Normalizes an email address to trimmed lowercase and checks its shape.
pub fn email(value: &str) -> Result<String, AppError> {
    let email = value.trim().to_lowercase();
    if !(5..=60).contains(&email.chars().count()) || !email.validate_email() {
        return Err(AppError::BadRequest(
            "email must be a valid email address".to_string(),
        ));
    }
    Ok(email)
}

/// Trims an optional URL field, mapping an empty value to `None`.
pub fn optional_trimmed(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
