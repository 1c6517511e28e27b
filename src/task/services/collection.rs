//! Service layer for task collection reads and mutations.
//!
//! The service is the single place where validation, domain construction,
//! and repository calls meet: validation failures terminate a request
//! before any store interaction, and repository outcomes are promoted to
//! not-found errors where the operation demands an existing record.

use crate::task::{
    domain::{Task, TaskId, TaskPatch, TaskPriority, TaskStatus},
    ports::{TaskQuery, TaskRepository, TaskRepositoryError},
    views::{TaskDraft, TaskValidationError, validate_patch},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for task collection operations.
#[derive(Debug, Error)]
pub enum TaskCollectionError {
    /// Input validation failed; the store was not reached.
    #[error(transparent)]
    Validation(#[from] TaskValidationError),

    /// The referenced task does not exist.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// No task in a bulk id set exists.
    #[error("no matching tasks found")]
    NoMatches,

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
}

/// Result type for task collection service operations.
pub type TaskCollectionResult<T> = Result<T, TaskCollectionError>;

/// Task collection orchestration service.
#[derive(Clone)]
pub struct TaskCollectionService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<R>,
    clock: Arc<C>,
}

impl<R, C> TaskCollectionService<R, C>
where
    R: TaskRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new task collection service.
    #[must_use]
    pub const fn new(repository: Arc<R>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Validates a create view and inserts the resulting task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Validation`] when the draft violates
    /// a field constraint, or [`TaskCollectionError::Repository`] when
    /// persistence fails.
    pub async fn create(&self, draft: TaskDraft) -> TaskCollectionResult<Task> {
        let new_task = draft.validate(self.clock.utc())?;
        let task = self.repository.insert(&new_task).await?;
        debug!(id = %task.id(), "task created");
        Ok(task)
    }

    /// Lists tasks matching the query, sorted then paginated.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Repository`] when the store fails.
    pub async fn list(&self, query: &TaskQuery) -> TaskCollectionResult<Vec<Task>> {
        Ok(self.repository.list(query).await?)
    }

    /// Retrieves a task by id.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] when no record matches.
    pub async fn get(&self, id: TaskId) -> TaskCollectionResult<Task> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or(TaskCollectionError::NotFound(id))
    }

    /// Validates a patch and applies its present fields to the identified
    /// task, refreshing `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Validation`] on constraint
    /// violations and [`TaskCollectionError::NotFound`] when no record
    /// matches.
    pub async fn update(&self, id: TaskId, patch: TaskPatch) -> TaskCollectionResult<Task> {
        let now = self.clock.utc();
        let validated = validate_patch(patch, now)?;
        self.repository
            .update(id, &validated, now)
            .await?
            .ok_or(TaskCollectionError::NotFound(id))
    }

    /// Permanently removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NotFound`] when no record matches.
    pub async fn delete(&self, id: TaskId) -> TaskCollectionResult<()> {
        if self.repository.delete(id).await? {
            debug!(id = %id, "task deleted");
            Ok(())
        } else {
            Err(TaskCollectionError::NotFound(id))
        }
    }

    /// Returns every task with the given status.
    ///
    /// Deliberately unpaginated, unlike [`Self::list`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Repository`] when the store fails.
    pub async fn filter_by_status(&self, status: TaskStatus) -> TaskCollectionResult<Vec<Task>> {
        Ok(self.repository.find_by_status(status).await?)
    }

    /// Returns every task with the given priority.
    ///
    /// Deliberately unpaginated, unlike [`Self::list`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Repository`] when the store fails.
    pub async fn filter_by_priority(
        &self,
        priority: TaskPriority,
    ) -> TaskCollectionResult<Vec<Task>> {
        Ok(self.repository.find_by_priority(priority).await?)
    }

    /// Deletes every task whose id is in the set, reporting the count.
    ///
    /// Ids with no matching record are silently ignored as long as at
    /// least one id matches.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::NoMatches`] when the set matches
    /// zero existing records.
    pub async fn bulk_delete(&self, ids: &[TaskId]) -> TaskCollectionResult<usize> {
        let removed = self.repository.delete_many(ids).await?;
        if removed == 0 {
            return Err(TaskCollectionError::NoMatches);
        }
        debug!(removed, "bulk delete");
        Ok(removed)
    }

    /// Applies one validated patch to every task whose id is in the set,
    /// returning the updated tasks.
    ///
    /// Ids with no matching record are silently ignored as long as at
    /// least one id matches.
    ///
    /// # Errors
    ///
    /// Returns [`TaskCollectionError::Validation`] on constraint
    /// violations and [`TaskCollectionError::NoMatches`] when the set
    /// matches zero existing records.
    pub async fn bulk_update(
        &self,
        ids: &[TaskId],
        patch: TaskPatch,
    ) -> TaskCollectionResult<Vec<Task>> {
        let now = self.clock.utc();
        let validated = validate_patch(patch, now)?;
        let updated = self.repository.update_many(ids, &validated, now).await?;
        if updated.is_empty() {
            return Err(TaskCollectionError::NoMatches);
        }
        debug!(updated = updated.len(), "bulk update");
        Ok(updated)
    }
}
