use chrono::{DateTime, NaiveDate};
use serde::de::DeserializeOwned;
use thiserror::Error;

use super::sanitize::purify;

pub const REQUIRED_MESSAGE: &str = "This field is required";
pub const INVALID_DATE_MESSAGE: &str = "Invalid date format";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Title,
    Description,
    Category,
    /// Long free text such as note bodies.
    Content,
    Date,
}

impl FieldKind {
    pub fn max_length(self) -> Option<usize> {
        match self {
            FieldKind::Title => Some(100),
            FieldKind::Description => Some(1000),
            FieldKind::Category => Some(50),
            FieldKind::Content => Some(10_000),
            FieldKind::Date => None,
        }
    }

    fn label(self) -> &'static str {
        match self {
            FieldKind::Title => "Title",
            FieldKind::Description => "Description",
            FieldKind::Category => "Category",
            FieldKind::Content => "Content",
            FieldKind::Date => "Date",
        }
    }
}

/// Outcome of checking one form field.
///
/// `sanitized_value` always holds the input exactly as typed, even when the
/// check fails, so a form can redisplay it. Escaping happens at the storage
/// boundary, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub is_valid: bool,
    pub sanitized_value: String,
    pub error: Option<String>,
}

impl FieldCheck {
    fn valid(input: &str) -> FieldCheck {
        FieldCheck {
            is_valid: true,
            sanitized_value: input.to_string(),
            error: None,
        }
    }

    fn invalid(input: &str, error: impl Into<String>) -> FieldCheck {
        FieldCheck {
            is_valid: false,
            sanitized_value: input.to_string(),
            error: Some(error.into()),
        }
    }
}

pub fn validate_and_sanitize_input(input: &str, kind: FieldKind, required: bool) -> FieldCheck {
    if input.trim().is_empty() {
        return if required {
            FieldCheck::invalid(input, REQUIRED_MESSAGE)
        } else {
            FieldCheck::valid(input)
        };
    }

    if let Some(max) = kind.max_length() {
        if input.chars().count() > max {
            return FieldCheck::invalid(
                input,
                format!("{} must be {} characters or less", kind.label(), max),
            );
        }
    }

    if kind == FieldKind::Date && parse_calendar_date(input).is_none() {
        return FieldCheck::invalid(input, INVALID_DATE_MESSAGE);
    }

    FieldCheck::valid(input)
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp.
pub fn parse_calendar_date(input: &str) -> Option<NaiveDate> {
    let input = input.trim();

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(input)
                .ok()
                .map(|timestamp| timestamp.date_naive())
        })
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

/// Implemented by request bodies that carry user-typed text.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

pub fn check_field(
    field: &'static str,
    input: &str,
    kind: FieldKind,
    required: bool,
) -> Result<(), ValidationError> {
    let check = validate_and_sanitize_input(input, kind, required);

    if let Some(message) = check.error {
        return Err(ValidationError { field, message });
    }

    // Markup is stripped before storage, so a required field made only of
    // tags would be stored empty.
    if required && purify(input).trim().is_empty() {
        return Err(ValidationError {
            field,
            message: REQUIRED_MESSAGE.to_string(),
        });
    }

    Ok(())
}

pub fn check_optional_field(
    field: &'static str,
    input: Option<&str>,
    kind: FieldKind,
    required: bool,
) -> Result<(), ValidationError> {
    match input {
        Some(input) => check_field(field, input, kind, required),
        None => Ok(()),
    }
}

pub fn check_list(
    field: &'static str,
    items: &[String],
    kind: FieldKind,
) -> Result<(), ValidationError> {
    for (index, item) in items.iter().enumerate() {
        check_field(field, item, kind, true).map_err(|e| ValidationError {
            field,
            message: format!("item {}: {}", index + 1, e.message),
        })?;
    }

    Ok(())
}

/// Parses one of an enum's serialized names, e.g. a query parameter.
pub fn parse_choice<T: DeserializeOwned>(
    field: &'static str,
    input: &str,
) -> Result<T, ValidationError> {
    serde_json::from_value(serde_json::Value::String(input.trim().to_string())).map_err(|_| {
        ValidationError {
            field,
            message: format!("Unknown value '{}'", input),
        }
    })
}
