//! Field guards shared by the entities.
//!
//! Every guard returns the reason as a [`DomainError::Validation`] so the
//! calling `change_*` operation can bail out with `?` before touching state.
//! The adapters at the bottom expose the same rules to the
//! `validator` derive used on construction inputs.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::ValidationError;

use crate::shared::types::{DomainError, DomainResult};

pub const MAX_NAME_LENGTH: usize = 100;
pub const MAX_LOGIN_ID_LENGTH: usize = 20;
pub const MIN_PASSWORD_LENGTH: usize = 8;
pub const MAX_PHONE_NUMBER_LENGTH: usize = 13;

static PHONE_NUMBER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(010)-([0-9]{4})-([0-9]{4})$").expect("Invalid phone number regex pattern")
});

/// Value must contain at least one non-whitespace character.
pub fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::validation(format!(
            "{field} must not be null, empty or blank"
        )));
    }
    Ok(())
}

pub fn max_length(field: &str, value: &str, max: usize) -> DomainResult<()> {
    if value.chars().count() > max {
        return Err(DomainError::validation(format!(
            "{field} must not exceed {max} characters"
        )));
    }
    Ok(())
}

pub fn min_length(field: &str, value: &str, min: usize) -> DomainResult<()> {
    if value.chars().count() < min {
        return Err(DomainError::validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    Ok(())
}

pub fn non_negative(field: &str, value: i32) -> DomainResult<()> {
    if value < 0 {
        return Err(DomainError::validation(format!(
            "{field} must not be negative"
        )));
    }
    Ok(())
}

pub fn within(field: &str, value: i32, min: i32, max: i32) -> DomainResult<()> {
    if value < min || value > max {
        return Err(DomainError::validation(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Unwraps a value that may not be absent.
pub fn require<T>(field: &str, value: Option<T>) -> DomainResult<T> {
    value.ok_or_else(|| DomainError::validation(format!("{field} must not be null")))
}

pub fn validate_name(value: &str) -> DomainResult<()> {
    require_text("name", value)?;
    max_length("name", value, MAX_NAME_LENGTH)
}

pub fn validate_password(value: &str) -> DomainResult<()> {
    require_text("password", value)?;
    min_length("password", value, MIN_PASSWORD_LENGTH)
}

pub fn validate_phone_number(value: &str) -> DomainResult<()> {
    require_text("phone number", value)?;
    max_length("phone number", value, MAX_PHONE_NUMBER_LENGTH)?;
    if !PHONE_NUMBER_PATTERN.is_match(value) {
        return Err(DomainError::validation(
            "phone number does not match the 010-XXXX-XXXX pattern",
        ));
    }
    Ok(())
}

// ── validator adapters ─────────────────────────────────────────

fn to_validation_error(code: &'static str, err: DomainError) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Owned(err.reason().to_string()));
    error
}

pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut error = ValidationError::new("blank");
        error.message = Some(Cow::Borrowed("must not be null, empty or blank"));
        return Err(error);
    }
    Ok(())
}

pub fn validate_password_rule(value: &str) -> Result<(), ValidationError> {
    validate_password(value).map_err(|e| to_validation_error("password", e))
}

pub fn validate_phone_number_rule(value: &str) -> Result<(), ValidationError> {
    validate_phone_number(value).map_err(|e| to_validation_error("phone_number", e))
}
