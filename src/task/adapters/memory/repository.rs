//! Thread-safe in-memory task repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskPatch, TaskPriority, TaskStatus},
    ports::{SortKey, SortOrder, TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// In-memory task repository mirroring the relational adapter's
/// filtering, sorting, and pagination semantics.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskRepository {
    state: Arc<RwLock<InMemoryTaskState>>,
}

#[derive(Debug, Default)]
struct InMemoryTaskState {
    tasks: BTreeMap<TaskId, Task>,
    next_id: i32,
}

impl InMemoryTaskRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> TaskRepositoryResult<std::sync::RwLockReadGuard<'_, InMemoryTaskState>> {
        self.state.read().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write(&self) -> TaskRepositoryResult<std::sync::RwLockWriteGuard<'_, InMemoryTaskState>> {
        self.state.write().map_err(|err| {
            TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

/// Case-insensitive substring match.
fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn matches(task: &Task, query: &TaskQuery) -> bool {
    if let Some(status) = query.status
        && task.status() != status
    {
        return false;
    }
    if let Some(priority) = query.priority
        && task.priority() != priority
    {
        return false;
    }
    if let Some(assignee) = &query.assigned_to
        && !task
            .assigned_to()
            .is_some_and(|value| contains_ci(value, assignee))
    {
        return false;
    }
    if let Some(search) = &query.search {
        let in_title = contains_ci(task.title(), search);
        let in_description = task
            .description()
            .is_some_and(|value| contains_ci(value, search));
        if !in_title && !in_description {
            return false;
        }
    }
    true
}

fn compare(a: &Task, b: &Task, key: SortKey) -> Ordering {
    match key {
        SortKey::Id => a.id().cmp(&b.id()),
        SortKey::Title => a.title().cmp(b.title()),
        SortKey::Description => a.description().cmp(&b.description()),
        SortKey::Status => a.status().as_str().cmp(b.status().as_str()),
        SortKey::Priority => a.priority().as_str().cmp(b.priority().as_str()),
        SortKey::CreatedAt => a.created_at().cmp(&b.created_at()),
        SortKey::UpdatedAt => a.updated_at().cmp(&b.updated_at()),
        SortKey::DueDate => a.due_date().cmp(&b.due_date()),
        SortKey::AssignedTo => a.assigned_to().cmp(&b.assigned_to()),
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn insert(&self, new_task: &NewTask) -> TaskRepositoryResult<Task> {
        let mut state = self.write()?;
        state.next_id += 1;
        let id = TaskId::new(state.next_id);
        let task = Task::from_persisted(PersistedTaskData {
            id,
            title: new_task.title.clone(),
            description: new_task.description.clone(),
            status: new_task.status,
            priority: new_task.priority,
            created_at: new_task.created_at,
            updated_at: None,
            due_date: new_task.due_date,
            assigned_to: new_task.assigned_to.clone(),
        });
        state.tasks.insert(id, task.clone());
        Ok(task)
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        let mut tasks: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| matches(task, query))
            .cloned()
            .collect();
        tasks.sort_by(|a, b| {
            let ordering = compare(a, b, query.sort_by);
            match query.sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });
        let skip = usize::try_from(query.skip).unwrap_or(0);
        let limit = usize::try_from(query.limit).unwrap_or(0);
        Ok(tasks.into_iter().skip(skip).take(limit).collect())
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        let state = self.read()?;
        Ok(state.tasks.get(&id).cloned())
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let mut state = self.write()?;
        let Some(task) = state.tasks.get_mut(&id) else {
            return Ok(None);
        };
        task.apply_patch(patch, now);
        Ok(Some(task.clone()))
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        let mut state = self.write()?;
        Ok(state.tasks.remove(&id).is_some())
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.status() == status)
            .cloned()
            .collect())
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> TaskRepositoryResult<Vec<Task>> {
        let state = self.read()?;
        Ok(state
            .tasks
            .values()
            .filter(|task| task.priority() == priority)
            .cloned()
            .collect())
    }

    async fn delete_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize> {
        let mut state = self.write()?;
        let mut removed = 0_usize;
        for id in ids {
            if state.tasks.remove(id).is_some() {
                removed += 1;
            }
        }
        Ok(removed)
    }

    async fn update_many(
        &self,
        ids: &[TaskId],
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let mut state = self.write()?;
        // Matched ids are applied in id order, mirroring the relational
        // adapter's row order.
        let mut matched: Vec<TaskId> = state
            .tasks
            .keys()
            .filter(|id| ids.contains(id))
            .copied()
            .collect();
        matched.sort_unstable();

        let mut updated = Vec::with_capacity(matched.len());
        for id in matched {
            if let Some(task) = state.tasks.get_mut(&id) {
                task.apply_patch(patch, now);
                updated.push(task.clone());
            }
        }
        Ok(updated)
    }
}
