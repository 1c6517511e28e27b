//! Taskboard server entry point.
//!
//! Wires the `PostgreSQL` repository and the collection service into the
//! HTTP surface: tracing subscriber, configuration from environment,
//! pool construction, startup schema creation, then serve.

use anyhow::Context;
use diesel::r2d2::{ConnectionManager, Pool};
use mockable::DefaultClock;
use std::net::SocketAddr;
use std::sync::Arc;
use taskboard::rest;
use taskboard::task::adapters::postgres::{PostgresTaskRepository, ensure_schema};
use taskboard::task::services::TaskCollectionService;
use tracing_subscriber::EnvFilter;

/// Default bind address when `BIND_ADDR` is unset.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let database_url =
        std::env::var("DATABASE_URL").context("DATABASE_URL must be set to a PostgreSQL URL")?;
    let pool = Pool::builder()
        .build(ConnectionManager::new(database_url))
        .context("failed to build the database connection pool")?;
    ensure_schema(&pool).context("failed to create the task table")?;

    let repository = Arc::new(PostgresTaskRepository::new(pool));
    let service = Arc::new(TaskCollectionService::new(repository, Arc::new(DefaultClock)));

    let addr: SocketAddr = std::env::var("BIND_ADDR")
        .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_owned())
        .parse()
        .context("BIND_ADDR must be a socket address")?;
    rest::serve(addr, service)
        .await
        .context("task API server failed")
}
