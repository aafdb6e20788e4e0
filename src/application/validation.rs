use once_cell::sync::Lazy;
use regex::Regex;

use crate::domain::customers::feedback::{MAX_RATING, MIN_RATING};

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid regex"));
static SIRET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{14}$").expect("valid regex"));
static POSTAL_CODE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9][A-Za-z0-9 \-]{1,9}$").expect("valid regex"));

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// A write that collides with an existing row.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ConflictError(pub String);

pub fn non_empty(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::new(field, "must not be empty"))
    } else {
        Ok(())
    }
}

pub fn email(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if EMAIL_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new(field, "not a valid email address"))
    }
}

pub fn siret(value: &str) -> Result<(), ValidationError> {
    if SIRET_RE.is_match(value) {
        Ok(())
    } else {
        Err(ValidationError::new("siret", "must be exactly 14 digits"))
    }
}

pub fn postal_code(value: &str) -> Result<(), ValidationError> {
    if POSTAL_CODE_RE.is_match(value.trim()) {
        Ok(())
    } else {
        Err(ValidationError::new("postal_code", "not a valid postal code"))
    }
}

pub fn rating(value: Option<i32>) -> Result<(), ValidationError> {
    match value {
        Some(r) if !(MIN_RATING..=MAX_RATING).contains(&r) => Err(ValidationError::new(
            "rating",
            format!("must be between {MIN_RATING} and {MAX_RATING}"),
        )),
        _ => Ok(()),
    }
}

pub fn password(value: &str) -> Result<(), ValidationError> {
    if value.chars().count() < MIN_PASSWORD_LEN {
        Err(ValidationError::new(
            "password",
            format!("must be at least {MIN_PASSWORD_LEN} characters"),
        ))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn emails() {
        assert!(email("email", "jane.doe@example.com").is_ok());
        assert!(email("email", "jane.doe@").is_err());
        assert!(email("email", "no at sign.com").is_err());
    }

    #[test]
    fn siret_needs_fourteen_digits() {
        assert!(siret("73282932000074").is_ok());
        assert!(siret("7328293200007").is_err());
        assert!(siret("7328293200007A").is_err());
    }

    #[test]
    fn postal_codes() {
        assert!(postal_code("75001").is_ok());
        assert!(postal_code("SW1A 1AA").is_ok());
        assert!(postal_code("").is_err());
        assert!(postal_code("1").is_err());
    }

    #[test]
    fn ratings_are_bounded() {
        assert!(rating(None).is_ok());
        assert!(rating(Some(1)).is_ok());
        assert!(rating(Some(5)).is_ok());
        assert_eq!(rating(Some(6)).unwrap_err().field, "rating");
        assert!(rating(Some(0)).is_err());
    }

    #[test]
    fn blank_is_empty() {
        assert!(non_empty("name", "  ").is_err());
        assert!(non_empty("name", "Acme").is_ok());
    }
}
