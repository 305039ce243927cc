//! Deterministic workflow instance identifiers.

use super::TaskAssignedEvent;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of one notification workflow instance.
///
/// Derived deterministically from the triggering event so a re-delivered
/// event maps to the same instance: journal records and timer registrations
/// keyed by this id collapse duplicates instead of scheduling twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowInstanceId(Uuid);

impl WorkflowInstanceId {
    /// Derives the instance identifier for an assignment event.
    #[must_use]
    pub fn for_event(event: &TaskAssignedEvent) -> Self {
        let namespace = Uuid::new_v5(&Uuid::NAMESPACE_DNS, b"notify.atelier");
        let name = format!("task-assigned:{}:{}", event.task_id(), event.origin());
        Self(Uuid::new_v5(&namespace, name.as_bytes()))
    }

    /// Creates an instance identifier from an existing UUID.
    #[must_use]
    pub const fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the wrapped UUID.
    #[must_use]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }
}

impl fmt::Display for WorkflowInstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
