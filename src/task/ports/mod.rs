//! Port contracts for task persistence.

mod repository;

pub use repository::{
    DEFAULT_LIMIT, SortKey, SortOrder, TaskQuery, TaskRepository, TaskRepositoryError,
    TaskRepositoryResult,
};
