//! In-memory adapter for tests and store-free runs.

mod repository;

pub use repository::InMemoryTaskRepository;
