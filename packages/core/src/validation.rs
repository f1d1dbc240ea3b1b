// ABOUTME: Input validation helpers for analysis requests
// ABOUTME: Length checks, required fields and char-boundary safe truncation

use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Il campo '{0}' è obbligatorio")]
    Missing(&'static str),

    #[error("Il campo '{field}' deve contenere almeno {min} caratteri")]
    TooShort { field: &'static str, min: usize },

    #[error("Il campo '{0}' deve essere un oggetto JSON")]
    NotAnObject(&'static str),

    #[error("Il campo '{0}' deve contenere almeno un elemento")]
    EmptyList(&'static str),

    #[error("{0}")]
    Invalid(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Fails when the trimmed value is empty
pub fn require_non_empty(field: &'static str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Missing(field));
    }
    Ok(())
}

/// Fails when the trimmed value has fewer than `min` characters
pub fn require_min_chars(field: &'static str, value: &str, min: usize) -> ValidationResult<()> {
    require_non_empty(field, value)?;
    if value.trim().chars().count() < min {
        return Err(ValidationError::TooShort { field, min });
    }
    Ok(())
}

/// Fails unless the value is a JSON object with at least one key
pub fn require_object(field: &'static str, value: &Value) -> ValidationResult<()> {
    match value {
        Value::Null => Err(ValidationError::Missing(field)),
        Value::Object(map) if map.is_empty() => Err(ValidationError::Missing(field)),
        Value::Object(_) => Ok(()),
        _ => Err(ValidationError::NotAnObject(field)),
    }
}

/// Loose address check: one `@` with a dotted domain after it
pub fn is_plausible_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

/// Cut `text` to at most `max_chars` characters without splitting a code point
pub fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
