//! Diesel row models for task persistence.

use super::schema::tasks;
use crate::task::domain::{NewTask, TaskPatch};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Store-assigned identifier.
    pub id: i32,
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Scheduling priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Latest mutation timestamp.
    pub updated_at: Option<DateTime<Utc>>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee.
    pub assigned_to: Option<String>,
}

/// Insert model for task records; the store assigns the id.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task title.
    pub title: String,
    /// Optional description.
    pub description: Option<String>,
    /// Workflow status.
    pub status: String,
    /// Scheduling priority.
    pub priority: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Optional deadline.
    pub due_date: Option<DateTime<Utc>>,
    /// Optional assignee.
    pub assigned_to: Option<String>,
}

impl From<&NewTask> for NewTaskRow {
    fn from(new_task: &NewTask) -> Self {
        Self {
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            status: new_task.status.as_str().to_owned(),
            priority: new_task.priority.as_str().to_owned(),
            created_at: new_task.created_at,
            due_date: new_task.due_date,
            assigned_to: new_task.assigned_to.clone(),
        }
    }
}

/// Partial-update changeset for task records.
///
/// `None` skips a column; `Some(None)` on a nullable column writes NULL.
/// This maps the presence-tracking patch directly onto Diesel's
/// changeset semantics.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = tasks)]
pub struct TaskChangeset {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement or cleared description.
    pub description: Option<Option<String>>,
    /// Replacement status.
    pub status: Option<String>,
    /// Replacement priority.
    pub priority: Option<String>,
    /// Replacement or cleared deadline.
    pub due_date: Option<Option<DateTime<Utc>>>,
    /// Replacement or cleared assignee.
    pub assigned_to: Option<Option<String>>,
    /// Mutation timestamp, always refreshed.
    pub updated_at: Option<DateTime<Utc>>,
}

impl TaskChangeset {
    /// Builds a changeset from a validated patch, stamping `now` as the
    /// mutation timestamp.
    #[must_use]
    pub fn from_patch(patch: &TaskPatch, now: DateTime<Utc>) -> Self {
        Self {
            title: patch.title.clone().flatten(),
            description: patch.description.clone(),
            status: patch
                .status
                .flatten()
                .map(|status| status.as_str().to_owned()),
            priority: patch
                .priority
                .flatten()
                .map(|priority| priority.as_str().to_owned()),
            due_date: patch.due_date,
            assigned_to: patch.assigned_to.clone(),
            updated_at: Some(now),
        }
    }
}
