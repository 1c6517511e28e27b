//! Unit tests for the task collection.

mod domain_tests;
mod query_tests;
