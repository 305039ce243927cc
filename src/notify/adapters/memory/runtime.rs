//! In-memory durable runtime for tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::WorkflowInstanceId,
    ports::{DurableRuntime, RuntimeError, SleepStatus},
};

type StepKey = (WorkflowInstanceId, String);

/// Clock-driven in-memory step journal and timer store.
///
/// Deadlines are compared against the injected clock, so tests advance a
/// fixed clock past the due date instead of sleeping.
#[derive(Debug, Clone)]
pub struct InMemoryRuntime<C>
where
    C: Clock + Send + Sync,
{
    state: Arc<RwLock<InMemoryRuntimeState>>,
    clock: Arc<C>,
}

#[derive(Debug, Default)]
struct InMemoryRuntimeState {
    journal: HashMap<StepKey, Value>,
    timers: HashMap<StepKey, DateTime<Utc>>,
}

impl<C> InMemoryRuntime<C>
where
    C: Clock + Send + Sync,
{
    /// Creates an empty runtime driven by the given clock.
    #[must_use]
    pub fn new(clock: Arc<C>) -> Self {
        Self {
            state: Arc::new(RwLock::new(InMemoryRuntimeState::default())),
            clock,
        }
    }

    /// Returns all registered timers as (instance, step, deadline) rows.
    #[must_use]
    pub fn registered_timers(&self) -> Vec<(WorkflowInstanceId, String, DateTime<Utc>)> {
        self.state
            .read()
            .map(|state| {
                state
                    .timers
                    .iter()
                    .map(|((instance, step), deadline)| (*instance, step.clone(), *deadline))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Returns the number of journal records across all instances.
    #[must_use]
    pub fn journal_len(&self) -> usize {
        self.state.read().map(|state| state.journal.len()).unwrap_or(0)
    }
}

fn lock_error(err: impl std::fmt::Display) -> RuntimeError {
    RuntimeError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl<C> DurableRuntime for InMemoryRuntime<C>
where
    C: Clock + Send + Sync,
{
    async fn recorded_step(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
    ) -> Result<Option<Value>, RuntimeError> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.journal.get(&(instance, step.to_owned())).cloned())
    }

    async fn record_step(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        output: Value,
    ) -> Result<(), RuntimeError> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .journal
            .entry((instance, step.to_owned()))
            .or_insert(output);
        Ok(())
    }

    async fn sleep_until(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        deadline: DateTime<Utc>,
    ) -> Result<SleepStatus, RuntimeError> {
        let mut state = self.state.write().map_err(lock_error)?;
        // First registration wins; re-delivery must not reschedule.
        state
            .timers
            .entry((instance, step.to_owned()))
            .or_insert(deadline);
        if self.clock.utc() >= deadline {
            Ok(SleepStatus::Elapsed)
        } else {
            Ok(SleepStatus::Pending)
        }
    }
}
