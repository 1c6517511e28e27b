//! Repository port for the task collection.

use crate::task::domain::{NewTask, Task, TaskId, TaskPatch, TaskPriority, TaskStatus};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Default page size when the caller supplies no limit.
pub const DEFAULT_LIMIT: i64 = 10;

/// Sortable columns of the task collection.
///
/// The explicit key map replaces attribute-name reflection: an
/// unrecognized name resolves to [`SortKey::CreatedAt`] rather than
/// failing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Sort by store-assigned identifier.
    Id,
    /// Sort by title.
    Title,
    /// Sort by description.
    Description,
    /// Sort by workflow status.
    Status,
    /// Sort by scheduling priority.
    Priority,
    /// Sort by creation timestamp.
    #[default]
    CreatedAt,
    /// Sort by latest mutation timestamp.
    UpdatedAt,
    /// Sort by deadline.
    DueDate,
    /// Sort by assignee.
    AssignedTo,
}

impl SortKey {
    /// Resolves a caller-supplied column name, falling back to
    /// `created_at` for unrecognized names.
    #[must_use]
    pub fn resolve(name: &str) -> Self {
        match name {
            "id" => Self::Id,
            "title" => Self::Title,
            "description" => Self::Description,
            "status" => Self::Status,
            "priority" => Self::Priority,
            "updated_at" => Self::UpdatedAt,
            "due_date" => Self::DueDate,
            "assigned_to" => Self::AssignedTo,
            _ => Self::CreatedAt,
        }
    }
}

/// Sort direction for list queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order, the default.
    #[default]
    Desc,
}

impl SortOrder {
    /// Resolves a caller-supplied direction: the literal `desc` sorts
    /// descending, anything else ascending.
    #[must_use]
    pub fn resolve(value: &str) -> Self {
        if value == "desc" { Self::Desc } else { Self::Asc }
    }
}

/// Filter, sort, and pagination parameters for listing tasks.
///
/// Supplied filters compose conjunctively; pagination applies after
/// sorting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskQuery {
    /// Leading results to discard after sorting.
    pub skip: i64,
    /// Maximum number of results to return.
    pub limit: i64,
    /// Equality filter on workflow status.
    pub status: Option<TaskStatus>,
    /// Equality filter on scheduling priority.
    pub priority: Option<TaskPriority>,
    /// Case-insensitive substring filter on the assignee.
    pub assigned_to: Option<String>,
    /// Case-insensitive substring filter over title or description.
    pub search: Option<String>,
    /// Sort column.
    pub sort_by: SortKey,
    /// Sort direction.
    pub sort_order: SortOrder,
}

impl Default for TaskQuery {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_LIMIT,
            status: None,
            priority: None,
            assigned_to: None,
            search: None,
            sort_by: SortKey::default(),
            sort_order: SortOrder::default(),
        }
    }
}

/// Task persistence contract.
///
/// Implementations hand each call its own scoped connection and apply
/// each mutation atomically. Missing records surface as `None`, `false`,
/// or empty collections; the service layer decides what counts as
/// not-found.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Inserts a new task, returning it with the store-assigned id and a
    /// null `updated_at`.
    async fn insert(&self, new_task: &NewTask) -> TaskRepositoryResult<Task>;

    /// Lists tasks matching the query, sorted then paginated.
    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>>;

    /// Finds a task by identifier. Returns `None` when absent.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Applies the present fields of a patch to the identified task,
    /// setting `updated_at` to `now`. Returns `None` when absent.
    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>>;

    /// Removes the identified task. Returns `false` when absent.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool>;

    /// Returns every task with the given status, unpaginated.
    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns every task with the given priority, unpaginated.
    async fn find_by_priority(&self, priority: TaskPriority) -> TaskRepositoryResult<Vec<Task>>;

    /// Removes every task whose id is in the set, returning the count
    /// removed. Unmatched ids are ignored.
    async fn delete_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize>;

    /// Applies the patch to every task whose id is in the set, setting
    /// each `updated_at` to `now`, and returns the updated tasks.
    /// Unmatched ids are ignored.
    async fn update_many(
        &self,
        ids: &[TaskId],
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    #[must_use]
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
