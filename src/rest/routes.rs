//! Task REST handlers.
//!
//! Each handler is a thin translation layer: validate input, invoke the
//! corresponding collection-service operation, and shape the result (or
//! error) as a response.

use super::error::ApiError;
use crate::task::{
    domain::{TaskId, TaskPatch, TaskPriority, TaskStatus},
    ports::{DEFAULT_LIMIT, SortKey, SortOrder, TaskQuery, TaskRepository},
    services::TaskCollectionService,
    views::{TaskDraft, TaskView},
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use mockable::Clock;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

/// Shared handler state: the task collection service.
pub type Service<R, C> = Arc<TaskCollectionService<R, C>>;

/// Raw query parameters accepted by the list endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListTasksParams {
    /// Leading results to discard; defaults to 0.
    pub skip: Option<i64>,
    /// Maximum results to return; defaults to 10.
    pub limit: Option<i64>,
    /// Equality filter on status.
    pub status_filter: Option<String>,
    /// Equality filter on priority.
    pub priority_filter: Option<String>,
    /// Case-insensitive substring filter on the assignee.
    pub assigned_to: Option<String>,
    /// Case-insensitive substring filter over title or description.
    pub search: Option<String>,
    /// Sort column name; unrecognized names fall back to `created_at`.
    pub sort_by: Option<String>,
    /// Sort direction; anything other than `desc` sorts ascending.
    pub sort_order: Option<String>,
}

impl TryFrom<ListTasksParams> for TaskQuery {
    type Error = ApiError;

    fn try_from(params: ListTasksParams) -> Result<Self, Self::Error> {
        let status = params
            .status_filter
            .as_deref()
            .map(TaskStatus::try_from)
            .transpose()
            .map_err(|err| ApiError::invalid_field("status_filter", err.to_string()))?;
        let priority = params
            .priority_filter
            .as_deref()
            .map(TaskPriority::try_from)
            .transpose()
            .map_err(|err| ApiError::invalid_field("priority_filter", err.to_string()))?;

        Ok(Self {
            skip: params.skip.unwrap_or(0),
            limit: params.limit.unwrap_or(DEFAULT_LIMIT),
            status,
            priority,
            assigned_to: params.assigned_to,
            search: params.search,
            sort_by: SortKey::resolve(params.sort_by.as_deref().unwrap_or("created_at")),
            sort_order: SortOrder::resolve(params.sort_order.as_deref().unwrap_or("desc")),
        })
    }
}

/// Body of the bulk update endpoint: the target id set and one patch.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkUpdateRequest {
    /// Ids of the tasks to patch.
    pub task_ids: Vec<TaskId>,
    /// Patch applied to every matched task.
    pub update: TaskPatch,
}

/// `POST /tasks/` — validates and inserts a task.
pub async fn create_task<R, C>(
    State(service): State<Service<R, C>>,
    Json(draft): Json<TaskDraft>,
) -> Result<(StatusCode, Json<TaskView>), ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.create(draft).await?;
    Ok((StatusCode::CREATED, Json(TaskView::from(&task))))
}

/// `GET /tasks/` — filtered, sorted, paginated listing.
pub async fn list_tasks<R, C>(
    State(service): State<Service<R, C>>,
    Query(params): Query<ListTasksParams>,
) -> Result<Json<Vec<TaskView>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let query = TaskQuery::try_from(params)?;
    let tasks = service.list(&query).await?;
    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// `GET /tasks/{id}` — single task lookup.
pub async fn get_task<R, C>(
    State(service): State<Service<R, C>>,
    Path(id): Path<i32>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.get(TaskId::new(id)).await?;
    Ok(Json(TaskView::from(&task)))
}

/// `PUT /tasks/{id}` — partial update from a presence-tracking patch.
pub async fn update_task<R, C>(
    State(service): State<Service<R, C>>,
    Path(id): Path<i32>,
    Json(patch): Json<TaskPatch>,
) -> Result<Json<TaskView>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let task = service.update(TaskId::new(id), patch).await?;
    Ok(Json(TaskView::from(&task)))
}

/// `DELETE /tasks/{id}` — permanent removal.
pub async fn delete_task<R, C>(
    State(service): State<Service<R, C>>,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    service.delete(TaskId::new(id)).await?;
    Ok(Json(json!({ "detail": "Task deleted" })))
}

/// `GET /tasks/status/{status}` — unpaginated status filter.
pub async fn filter_by_status<R, C>(
    State(service): State<Service<R, C>>,
    Path(status): Path<String>,
) -> Result<Json<Vec<TaskView>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let status = TaskStatus::try_from(status.as_str())
        .map_err(|err| ApiError::invalid_field("status", err.to_string()))?;
    let tasks = service.filter_by_status(status).await?;
    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// `GET /tasks/priority/{priority}` — unpaginated priority filter.
pub async fn filter_by_priority<R, C>(
    State(service): State<Service<R, C>>,
    Path(priority): Path<String>,
) -> Result<Json<Vec<TaskView>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let priority = TaskPriority::try_from(priority.as_str())
        .map_err(|err| ApiError::invalid_field("priority", err.to_string()))?;
    let tasks = service.filter_by_priority(priority).await?;
    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// `DELETE /tasks/bulk` — removes every matched id, reporting the count.
pub async fn bulk_delete<R, C>(
    State(service): State<Service<R, C>>,
    Json(task_ids): Json<Vec<TaskId>>,
) -> Result<Json<Value>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let removed = service.bulk_delete(&task_ids).await?;
    Ok(Json(json!({ "detail": format!("Deleted {removed} tasks") })))
}

/// `PUT /tasks/bulk` — applies one patch to every matched id.
pub async fn bulk_update<R, C>(
    State(service): State<Service<R, C>>,
    Json(request): Json<BulkUpdateRequest>,
) -> Result<Json<Vec<TaskView>>, ApiError>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let tasks = service
        .bulk_update(&request.task_ids, request.update)
        .await?;
    Ok(Json(tasks.iter().map(TaskView::from).collect()))
}

/// `GET /tasks/info` — static capability listing.
#[expect(clippy::unused_async, reason = "axum handlers take async signatures")]
pub async fn info() -> Json<Value> {
    Json(json!({
        "message": "Welcome to Task Management API",
        "endpoints": [
            "POST /tasks/",
            "GET /tasks/",
            "GET /tasks/{task_id}",
            "PUT /tasks/{task_id}",
            "DELETE /tasks/{task_id}",
            "GET /tasks/status/{status}",
            "GET /tasks/priority/{priority}",
            "DELETE /tasks/bulk",
            "PUT /tasks/bulk",
            "GET /tasks/info",
            "GET /tasks/health"
        ]
    }))
}

/// `GET /tasks/health` — liveness probe.
#[expect(clippy::unused_async, reason = "axum handlers take async signatures")]
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "Success" }))
}
