//! Task-assignment notification workflow.
//!
//! A task-assigned event produces one workflow instance that sends an
//! immediate email to the assignee, durably waits until the task's due
//! date, then re-checks the task and sends a reminder if it is still
//! incomplete. Durable-execution primitives (step journal, timers) and mail
//! delivery are consumed through ports; the workflow itself never retries,
//! and failures surface to the caller, which owns retry policy. The module
//! follows hexagonal architecture:
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
