//! Field validation errors and shared validation rules.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("valid email regex")
});

/// Field-level validation failure raised by entity construction and updates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required text field is empty after trim.
    EmptyField { field: &'static str },
    /// Task priority outside `1..=3`.
    InvalidPriority(i64),
    InvalidTaskStatus(String),
    InvalidProjectStatus(String),
    InvalidRole(String),
    InvalidEmail(String),
    /// Date field text is not ISO-8601.
    InvalidTimestamp { field: &'static str, value: String },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidPriority(value) => {
                write!(f, "priority must be 1, 2 or 3, got {value}")
            }
            Self::InvalidTaskStatus(value) => write!(f, "invalid task status `{value}`"),
            Self::InvalidProjectStatus(value) => {
                write!(f, "invalid project status `{value}`")
            }
            Self::InvalidRole(value) => write!(
                f,
                "invalid role `{value}`; expected admin|manager|developer"
            ),
            Self::InvalidEmail(value) => write!(f, "invalid email `{value}`"),
            Self::InvalidTimestamp { field, value } => write!(
                f,
                "{field} must be an ISO-8601 date or date-time, got `{value}`"
            ),
        }
    }
}

impl Error for ValidationError {}

/// Trims `value` and rejects it when nothing remains.
pub fn require_non_empty(field: &'static str, value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}

/// Trims `value` and checks it against the accepted email shape.
pub fn normalize_email(value: &str) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if is_valid_email(trimmed) {
        Ok(trimmed.to_string())
    } else {
        Err(ValidationError::InvalidEmail(trimmed.to_string()))
    }
}

/// Returns whether `value` has a local part, `@`, and a dotted domain with an
/// alphabetic suffix of at least two letters.
pub fn is_valid_email(value: &str) -> bool {
    EMAIL_RE.is_match(value)
}
