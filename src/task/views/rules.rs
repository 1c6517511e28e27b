//! Individual validation rule implementations.
//!
//! Each rule is a pure function that checks one field constraint and
//! returns a [`FieldViolation`] on failure. The view-level entry points
//! compose these rules and collect every violation rather than stopping
//! at the first.

use super::FieldViolation;
use chrono::{DateTime, Utc};

/// Maximum title length in characters.
pub const TITLE_MAX_CHARS: usize = 200;

/// Maximum description length in characters.
pub const DESCRIPTION_MAX_CHARS: usize = 1000;

/// Maximum assignee length in characters.
pub const ASSIGNEE_MAX_CHARS: usize = 100;

/// Validates and normalizes a title.
///
/// Trimming happens before the emptiness and length checks; the returned
/// value is the trimmed string.
///
/// # Errors
///
/// Returns a violation when the title is empty or whitespace-only after
/// trimming, or exceeds [`TITLE_MAX_CHARS`].
pub fn validate_title(raw: &str) -> Result<String, FieldViolation> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(FieldViolation::new(
            "title",
            "must not be empty or whitespace only",
        ));
    }
    if trimmed.chars().count() > TITLE_MAX_CHARS {
        return Err(FieldViolation::new(
            "title",
            format!("must be at most {TITLE_MAX_CHARS} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Validates an optional free-text field against a character cap.
///
/// # Errors
///
/// Returns a violation when the value exceeds `max_chars`.
pub fn validate_text_length(
    field: &'static str,
    value: Option<&str>,
    max_chars: usize,
) -> Result<(), FieldViolation> {
    match value {
        Some(text) if text.chars().count() > max_chars => Err(FieldViolation::new(
            field,
            format!("must be at most {max_chars} characters"),
        )),
        _ => Ok(()),
    }
}

/// Validates that a due date, when supplied, lies strictly in the future.
///
/// # Errors
///
/// Returns a violation when the due date is at or before `now`.
pub fn validate_due_date(
    due_date: Option<DateTime<Utc>>,
    now: DateTime<Utc>,
) -> Result<(), FieldViolation> {
    match due_date {
        Some(due) if due <= now => Err(FieldViolation::new(
            "due_date",
            "must be in the future",
        )),
        _ => Ok(()),
    }
}
