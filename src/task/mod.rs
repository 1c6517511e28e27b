//! Task collection management.
//!
//! This module implements the task resource end to end: creating records
//! from validated input, filtered and paginated listing, partial updates
//! driven by a presence-tracking patch, and bulk mutations over id sets.
//! The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Input/output views and validation in [`views`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;
pub mod views;

#[cfg(test)]
mod tests;
