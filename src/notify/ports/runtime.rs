//! Durable-execution port: step journal and timers.
//!
//! The workflow consumes two primitives from an external substrate: "run
//! named idempotent step" (modelled as a journal keyed by instance and step
//! name, first write wins) and "sleep until timestamp" (modelled as an
//! idempotent timer registration that reports whether the deadline has
//! passed). Checkpointing, retry, and re-invocation scheduling belong to
//! the substrate, not to this crate.

use crate::notify::domain::WorkflowInstanceId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Outcome of a durable sleep request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepStatus {
    /// The deadline has passed; the workflow continues.
    Elapsed,
    /// The deadline lies ahead; the timer is registered and the workflow
    /// should suspend.
    Pending,
}

/// Errors returned by durable-runtime implementations.
#[derive(Debug, Clone, Error)]
pub enum RuntimeError {
    /// Journal or timer storage failure.
    #[error("durable runtime error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RuntimeError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

/// Durable step journal and timer contract.
#[async_trait]
pub trait DurableRuntime: Send + Sync {
    /// Returns the recorded output of a completed step, if any.
    async fn recorded_step(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
    ) -> Result<Option<Value>, RuntimeError>;

    /// Records a step's output. The first record for a given
    /// (instance, step) pair wins; later records are ignored.
    async fn record_step(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        output: Value,
    ) -> Result<(), RuntimeError>;

    /// Registers a durable timer for the instance and reports whether the
    /// deadline has already passed.
    ///
    /// Registration is idempotent per (instance, step): re-invoking an
    /// instance must not schedule a second wake-up.
    async fn sleep_until(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        deadline: DateTime<Utc>,
    ) -> Result<SleepStatus, RuntimeError>;
}
