//! Domain model for the task collection.
//!
//! The task domain models the record shape, its two closed enumerations,
//! and partial-patch application while keeping all infrastructure concerns
//! outside of the domain boundary.

mod error;
mod ids;
mod patch;
mod task;

pub use error::{ParseTaskPriorityError, ParseTaskStatusError};
pub use ids::TaskId;
pub use patch::TaskPatch;
pub use task::{NewTask, PersistedTaskData, Task, TaskPriority, TaskStatus};
