//! HTTP surface for the task collection.
//!
//! Axum router mapping the `/tasks` endpoints onto the collection
//! service. The router is generic over the repository and clock so the
//! same surface runs against `PostgreSQL` in production and the in-memory
//! adapter in tests.

mod error;
pub mod routes;

pub use error::ApiError;

use crate::task::{ports::TaskRepository, services::TaskCollectionService};
use axum::{
    Router,
    routing::{delete, get},
};
use mockable::Clock;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Builds the `/tasks` router over the given collection service.
#[must_use]
pub fn build_router<R, C>(service: Arc<TaskCollectionService<R, C>>) -> Router
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/tasks/",
            get(routes::list_tasks::<R, C>).post(routes::create_task::<R, C>),
        )
        .route("/tasks/info", get(routes::info))
        .route("/tasks/health", get(routes::health))
        .route(
            "/tasks/bulk",
            delete(routes::bulk_delete::<R, C>).put(routes::bulk_update::<R, C>),
        )
        .route("/tasks/status/{status}", get(routes::filter_by_status::<R, C>))
        .route(
            "/tasks/priority/{priority}",
            get(routes::filter_by_priority::<R, C>),
        )
        .route(
            "/tasks/{id}",
            get(routes::get_task::<R, C>)
                .put(routes::update_task::<R, C>)
                .delete(routes::delete_task::<R, C>),
        )
        .with_state(service)
}

/// Binds the listener and serves the task API until shutdown.
///
/// # Errors
///
/// Returns an [`std::io::Error`] when binding or serving fails.
pub async fn serve<R, C>(
    addr: SocketAddr,
    service: Arc<TaskCollectionService<R, C>>,
) -> std::io::Result<()>
where
    R: TaskRepository + 'static,
    C: Clock + Send + Sync + 'static,
{
    let router = build_router(service);
    let listener = TcpListener::bind(addr).await?;
    info!("task API listening on http://{addr}");
    axum::serve(listener, router).await
}
