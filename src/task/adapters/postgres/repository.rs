//! `PostgreSQL` repository implementation for the task collection.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::task::{
    domain::{NewTask, PersistedTaskData, Task, TaskId, TaskPatch, TaskPriority, TaskStatus},
    ports::{SortKey, SortOrder, TaskQuery, TaskRepository, TaskRepositoryError, TaskRepositoryResult},
};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, Pool};

/// `PostgreSQL` connection pool type used by task adapters.
pub type TaskPgPool = Pool<ConnectionManager<PgConnection>>;

/// Creates the task table when it does not exist yet.
///
/// The service creates its schema at startup; the statement is a no-op on
/// an initialized database.
///
/// # Errors
///
/// Returns [`TaskRepositoryError::Persistence`] when the pool or the
/// statement fails.
pub fn ensure_schema(pool: &TaskPgPool) -> TaskRepositoryResult<()> {
    let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
    diesel::sql_query(concat!(
        "CREATE TABLE IF NOT EXISTS tasks (",
        "id SERIAL PRIMARY KEY, ",
        "title VARCHAR(200) NOT NULL, ",
        "description VARCHAR(1000), ",
        "status VARCHAR(50) NOT NULL, ",
        "priority VARCHAR(50) NOT NULL, ",
        "created_at TIMESTAMPTZ NOT NULL, ",
        "updated_at TIMESTAMPTZ, ",
        "due_date TIMESTAMPTZ, ",
        "assigned_to VARCHAR(100))",
    ))
    .execute(&mut connection)
    .map_err(TaskRepositoryError::persistence)?;
    Ok(())
}

/// `PostgreSQL`-backed task repository.
///
/// Each call checks its own connection out of the pool on the blocking
/// thread pool and releases it when the closure returns, success or
/// failure.
#[derive(Debug, Clone)]
pub struct PostgresTaskRepository {
    pool: TaskPgPool,
}

impl PostgresTaskRepository {
    /// Creates a new repository from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: TaskPgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskRepositoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskRepositoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskRepositoryError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskRepositoryError::persistence)?
    }
}

fn row_to_task(row: TaskRow) -> TaskRepositoryResult<Task> {
    let status =
        TaskStatus::try_from(row.status.as_str()).map_err(TaskRepositoryError::persistence)?;
    let priority =
        TaskPriority::try_from(row.priority.as_str()).map_err(TaskRepositoryError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::new(row.id),
        title: row.title,
        description: row.description,
        status,
        priority,
        created_at: row.created_at,
        updated_at: row.updated_at,
        due_date: row.due_date,
        assigned_to: row.assigned_to,
    }))
}

fn rows_to_tasks(rows: Vec<TaskRow>) -> TaskRepositoryResult<Vec<Task>> {
    rows.into_iter().map(row_to_task).collect()
}

fn raw_ids(ids: &[TaskId]) -> Vec<i32> {
    ids.iter().copied().map(TaskId::into_inner).collect()
}

/// Wraps a filter value in SQL LIKE wildcards.
fn substring_pattern(value: &str) -> String {
    format!("%{value}%")
}

#[async_trait]
impl TaskRepository for PostgresTaskRepository {
    async fn insert(&self, new_task: &NewTask) -> TaskRepositoryResult<Task> {
        let new_row = NewTaskRow::from(new_task);
        self.run_blocking(move |connection| {
            let row = diesel::insert_into(tasks::table)
                .values(&new_row)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            row_to_task(row)
        })
        .await
    }

    async fn list(&self, query: &TaskQuery) -> TaskRepositoryResult<Vec<Task>> {
        let params = query.clone();
        self.run_blocking(move |connection| {
            let mut statement = tasks::table.into_boxed();

            if let Some(status) = params.status {
                statement = statement.filter(tasks::status.eq(status.as_str()));
            }
            if let Some(priority) = params.priority {
                statement = statement.filter(tasks::priority.eq(priority.as_str()));
            }
            if let Some(assignee) = &params.assigned_to {
                statement =
                    statement.filter(tasks::assigned_to.ilike(substring_pattern(assignee)));
            }
            if let Some(search) = &params.search {
                let pattern = substring_pattern(search);
                statement = statement.filter(
                    tasks::title
                        .ilike(pattern.clone())
                        .nullable()
                        .or(tasks::description.ilike(pattern)),
                );
            }

            statement = match (params.sort_by, params.sort_order) {
                (SortKey::Id, SortOrder::Asc) => statement.order(tasks::id.asc()),
                (SortKey::Id, SortOrder::Desc) => statement.order(tasks::id.desc()),
                (SortKey::Title, SortOrder::Asc) => statement.order(tasks::title.asc()),
                (SortKey::Title, SortOrder::Desc) => statement.order(tasks::title.desc()),
                (SortKey::Description, SortOrder::Asc) => {
                    statement.order(tasks::description.asc())
                }
                (SortKey::Description, SortOrder::Desc) => {
                    statement.order(tasks::description.desc())
                }
                (SortKey::Status, SortOrder::Asc) => statement.order(tasks::status.asc()),
                (SortKey::Status, SortOrder::Desc) => statement.order(tasks::status.desc()),
                (SortKey::Priority, SortOrder::Asc) => statement.order(tasks::priority.asc()),
                (SortKey::Priority, SortOrder::Desc) => statement.order(tasks::priority.desc()),
                (SortKey::CreatedAt, SortOrder::Asc) => statement.order(tasks::created_at.asc()),
                (SortKey::CreatedAt, SortOrder::Desc) => statement.order(tasks::created_at.desc()),
                (SortKey::UpdatedAt, SortOrder::Asc) => statement.order(tasks::updated_at.asc()),
                (SortKey::UpdatedAt, SortOrder::Desc) => statement.order(tasks::updated_at.desc()),
                (SortKey::DueDate, SortOrder::Asc) => statement.order(tasks::due_date.asc()),
                (SortKey::DueDate, SortOrder::Desc) => statement.order(tasks::due_date.desc()),
                (SortKey::AssignedTo, SortOrder::Asc) => statement.order(tasks::assigned_to.asc()),
                (SortKey::AssignedTo, SortOrder::Desc) => {
                    statement.order(tasks::assigned_to.desc())
                }
            };

            let rows = statement
                .offset(params.skip)
                .limit(params.limit)
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>> {
        self.run_blocking(move |connection| {
            let row = tasks::table
                .find(id.into_inner())
                .select(TaskRow::as_select())
                .first::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn update(
        &self,
        id: TaskId,
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Option<Task>> {
        let changeset = TaskChangeset::from_patch(patch, now);
        self.run_blocking(move |connection| {
            let row = diesel::update(tasks::table.find(id.into_inner()))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_result::<TaskRow>(connection)
                .optional()
                .map_err(TaskRepositoryError::persistence)?;
            row.map(row_to_task).transpose()
        })
        .await
    }

    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<bool> {
        self.run_blocking(move |connection| {
            let removed = diesel::delete(tasks::table.find(id.into_inner()))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)?;
            Ok(removed > 0)
        })
        .await
    }

    async fn find_by_status(&self, status: TaskStatus) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::status.eq(status.as_str()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn find_by_priority(&self, priority: TaskPriority) -> TaskRepositoryResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            let rows = tasks::table
                .filter(tasks::priority.eq(priority.as_str()))
                .select(TaskRow::as_select())
                .load::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows_to_tasks(rows)
        })
        .await
    }

    async fn delete_many(&self, ids: &[TaskId]) -> TaskRepositoryResult<usize> {
        let id_values = raw_ids(ids);
        self.run_blocking(move |connection| {
            diesel::delete(tasks::table.filter(tasks::id.eq_any(id_values)))
                .execute(connection)
                .map_err(TaskRepositoryError::persistence)
        })
        .await
    }

    async fn update_many(
        &self,
        ids: &[TaskId],
        patch: &TaskPatch,
        now: DateTime<Utc>,
    ) -> TaskRepositoryResult<Vec<Task>> {
        let id_values = raw_ids(ids);
        let changeset = TaskChangeset::from_patch(patch, now);
        self.run_blocking(move |connection| {
            let mut rows = diesel::update(tasks::table.filter(tasks::id.eq_any(id_values)))
                .set(&changeset)
                .returning(TaskRow::as_returning())
                .get_results::<TaskRow>(connection)
                .map_err(TaskRepositoryError::persistence)?;
            rows.sort_by_key(|row| row.id);
            rows_to_tasks(rows)
        })
        .await
    }
}
