//! Orchestration services for the task collection.

mod collection;

pub use collection::{TaskCollectionError, TaskCollectionResult, TaskCollectionService};
