//! Taskboard: a task-collection CRUD service.
//!
//! This crate exposes a single managed resource, the task record, behind a
//! small HTTP surface with filtering, sorting, pagination, and bulk
//! mutations over a relational store.
//!
//! # Architecture
//!
//! Taskboard follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for external interactions
//! - **Adapters**: Concrete implementations of ports (database, memory)
//!
//! # Modules
//!
//! - [`task`]: Task entity, validation views, query engine, and adapters
//! - [`rest`]: HTTP handlers translating requests to task operations

pub mod rest;
pub mod task;
