//! Error types for view validation.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single field-level constraint violation.
#[derive(Debug, Clone, Error, PartialEq, Eq, Serialize)]
#[error("{field}: {message}")]
pub struct FieldViolation {
    /// Name of the offending field.
    pub field: &'static str,
    /// Human-readable reason the constraint failed.
    pub message: String,
}

impl FieldViolation {
    /// Creates a violation for the named field.
    #[must_use]
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Validation failure listing every offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskValidationError {
    violations: Vec<FieldViolation>,
}

impl TaskValidationError {
    /// Wraps a non-empty list of violations.
    #[must_use]
    pub const fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Returns the collected violations.
    #[must_use]
    pub fn violations(&self) -> &[FieldViolation] {
        &self.violations
    }
}

impl fmt::Display for TaskValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task validation failed: ")?;
        for (index, violation) in self.violations.iter().enumerate() {
            if index > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{violation}")?;
        }
        Ok(())
    }
}

impl std::error::Error for TaskValidationError {}
