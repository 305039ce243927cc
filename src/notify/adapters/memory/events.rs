//! In-memory assignment event queue for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::TaskAssignedEvent,
    ports::{AssignmentEventSink, EventSinkError},
};

/// Queue that collects published assignment events.
///
/// Tests drain the queue and feed the events to the workflow by hand,
/// standing in for the delivery channel between the task service and the
/// notification substrate.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssignmentEvents {
    queue: Arc<RwLock<Vec<TaskAssignedEvent>>>,
}

impl InMemoryAssignmentEvents {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Removes and returns all queued events.
    #[must_use]
    pub fn drain(&self) -> Vec<TaskAssignedEvent> {
        self.queue
            .write()
            .map(|mut queue| std::mem::take(&mut *queue))
            .unwrap_or_default()
    }
}

#[async_trait]
impl AssignmentEventSink for InMemoryAssignmentEvents {
    async fn publish(&self, event: &TaskAssignedEvent) -> Result<(), EventSinkError> {
        let mut queue = self
            .queue
            .write()
            .map_err(|err| EventSinkError(err.to_string()))?;
        queue.push(event.clone());
        Ok(())
    }
}
