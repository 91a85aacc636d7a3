//! Client-side form checks run before any request is sent.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::ValidationError;
use crate::models::{Role, TimeOfDay, Weekday};

static EMAIL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern"));

pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

pub fn require<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(trimmed)
}

pub fn username(value: &str) -> Result<(), ValidationError> {
    if value.trim().chars().count() < MIN_USERNAME_LEN {
        return Err(ValidationError::UsernameTooShort);
    }
    Ok(())
}

pub fn email(value: &str) -> Result<(), ValidationError> {
    if !is_valid_email(value) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

/// Password on an edit form: empty leaves it unchanged.
pub fn optional_password(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    password(value)
}

pub fn role(value: &str) -> Result<Role, ValidationError> {
    Role::parse(value.trim()).ok_or(ValidationError::InvalidRole)
}

pub fn time(value: &str) -> Result<TimeOfDay, ValidationError> {
    TimeOfDay::parse(value).ok_or_else(|| ValidationError::InvalidTime(value.to_string()))
}

pub fn date(value: &str) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::InvalidDate(value.to_string()))
}

pub fn weekday(value: &str) -> Result<Weekday, ValidationError> {
    Weekday::parse(value).ok_or_else(|| ValidationError::UnknownDay(value.to_string()))
}

/// Parse both ends and require `start < end`.
pub fn time_range(start: &str, end: &str) -> Result<(TimeOfDay, TimeOfDay), ValidationError> {
    let start = time(start)?;
    let end = time(end)?;
    if start >= end {
        return Err(ValidationError::TimeOrder);
    }
    Ok((start, end))
}
