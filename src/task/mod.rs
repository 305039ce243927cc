//! Tasks and comments within a project.
//!
//! Tasks carry a due date, a free-form status, and an optional assignee;
//! assigning a task publishes the event that triggers the notification
//! workflow in [`crate::notify`]. Comments hang off tasks and are gated on
//! project membership. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
