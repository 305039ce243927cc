//! Assignment event delivery port.

use crate::notify::domain::TaskAssignedEvent;
use async_trait::async_trait;
use thiserror::Error;

/// Error returned when an assignment event cannot be handed off.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("assignment event delivery failed: {0}")]
pub struct EventSinkError(pub String);

/// Outbound channel for task-assignment events.
///
/// The task service publishes here; whatever drives the notification
/// workflow (a queue, a scheduler, a test harness) consumes on the other
/// side.
#[async_trait]
pub trait AssignmentEventSink: Send + Sync {
    /// Hands one event to the delivery channel.
    ///
    /// # Errors
    ///
    /// Returns [`EventSinkError`] when the event cannot be enqueued.
    async fn publish(&self, event: &TaskAssignedEvent) -> Result<(), EventSinkError>;
}
