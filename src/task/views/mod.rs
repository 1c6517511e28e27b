//! Input and output views over the task record.
//!
//! Views are the validated shapes of task data for a specific direction:
//! [`TaskDraft`] for creation, [`TaskPatch`] for partial update, and
//! [`TaskView`] for responses. Validation is pure: given raw field values
//! and the current instant it returns either a normalized domain value or
//! the full list of field-level violations, and the store is never reached
//! on failure.

mod error;
pub mod rules;

pub use error::{FieldViolation, TaskValidationError};

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Create view: the raw fields accepted when creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskDraft {
    /// Required title; trimmed and checked for emptiness during validation.
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: Option<String>,
    /// Workflow status; defaults to `pending` when absent.
    #[serde(default)]
    pub status: Option<TaskStatus>,
    /// Scheduling priority; defaults to `medium` when absent.
    #[serde(default)]
    pub priority: Option<TaskPriority>,
    /// Optional deadline; must be strictly in the future.
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee.
    #[serde(default)]
    pub assigned_to: Option<String>,
}

impl TaskDraft {
    /// Validates the draft against the field constraints and derives the
    /// stated defaults, stamping `now` as the creation timestamp.
    ///
    /// # Errors
    ///
    /// Returns a [`TaskValidationError`] listing every offending field when
    /// any constraint is violated.
    pub fn validate(self, now: DateTime<Utc>) -> Result<NewTask, TaskValidationError> {
        let mut violations = Vec::new();

        let title = rules::validate_title(&self.title)
            .map_err(|violation| violations.push(violation))
            .ok();
        if let Err(violation) = rules::validate_text_length(
            "description",
            self.description.as_deref(),
            rules::DESCRIPTION_MAX_CHARS,
        ) {
            violations.push(violation);
        }
        if let Err(violation) = rules::validate_text_length(
            "assigned_to",
            self.assigned_to.as_deref(),
            rules::ASSIGNEE_MAX_CHARS,
        ) {
            violations.push(violation);
        }
        if let Err(violation) = rules::validate_due_date(self.due_date, now) {
            violations.push(violation);
        }

        match title {
            Some(title) if violations.is_empty() => Ok(NewTask {
                title,
                description: self.description,
                status: self.status.unwrap_or_default(),
                priority: self.priority.unwrap_or_default(),
                due_date: self.due_date,
                assigned_to: self.assigned_to,
                created_at: now,
            }),
            _ => Err(TaskValidationError::new(violations)),
        }
    }
}

/// Validates the present fields of an update patch, normalizing the title.
///
/// Absent fields pass untouched. Present values obey the create-view
/// constraints; an explicit null for the non-nullable fields `title`,
/// `status`, and `priority` is a violation, while an explicit null for the
/// nullable fields clears them.
///
/// # Errors
///
/// Returns a [`TaskValidationError`] listing every offending field when
/// any present field violates its constraint.
pub fn validate_patch(
    patch: TaskPatch,
    now: DateTime<Utc>,
) -> Result<TaskPatch, TaskValidationError> {
    let mut violations = Vec::new();

    let title = match patch.title {
        Some(Some(raw)) => rules::validate_title(&raw)
            .map_err(|violation| violations.push(violation))
            .ok()
            .map(Some),
        Some(None) => {
            violations.push(FieldViolation::new("title", "must not be null"));
            None
        }
        None => None,
    };
    if patch.status == Some(None) {
        violations.push(FieldViolation::new("status", "must not be null"));
    }
    if patch.priority == Some(None) {
        violations.push(FieldViolation::new("priority", "must not be null"));
    }
    if let Some(description) = &patch.description
        && let Err(violation) = rules::validate_text_length(
            "description",
            description.as_deref(),
            rules::DESCRIPTION_MAX_CHARS,
        )
    {
        violations.push(violation);
    }
    if let Some(assigned_to) = &patch.assigned_to
        && let Err(violation) = rules::validate_text_length(
            "assigned_to",
            assigned_to.as_deref(),
            rules::ASSIGNEE_MAX_CHARS,
        )
    {
        violations.push(violation);
    }
    if let Some(due_date) = patch.due_date
        && let Err(violation) = rules::validate_due_date(due_date, now)
    {
        violations.push(violation);
    }

    if violations.is_empty() {
        Ok(TaskPatch { title, ..patch })
    } else {
        Err(TaskValidationError::new(violations))
    }
}

/// Output view: the task shape returned to callers. Read-only, never
/// accepted as input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskView {
    /// Store-assigned identifier.
    pub id: TaskId,
    /// Task title.
    pub title: String,
    /// Description, if any.
    pub description: Option<String>,
    /// Workflow status.
    pub status: TaskStatus,
    /// Scheduling priority.
    pub priority: TaskPriority,
    /// Deadline, if any.
    pub due_date: Option<DateTime<Utc>>,
    /// Assignee, if any.
    pub assigned_to: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp, null until first mutation.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&Task> for TaskView {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(str::to_owned),
            status: task.status(),
            priority: task.priority(),
            due_date: task.due_date(),
            assigned_to: task.assigned_to().map(str::to_owned),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}
