//! Inbound task-assignment event.

use crate::task::domain::TaskId;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error returned for malformed origin URLs.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid origin '{0}', expected an absolute http(s) URL")]
pub struct InvalidOriginError(pub String);

/// Absolute base URL the email links point back to.
///
/// The triggering client supplies its own origin so the "View Task" link
/// lands on whichever deployment raised the event.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Origin(String);

impl Origin {
    /// Creates a validated origin.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidOriginError`] when the value is not an absolute
    /// `http://` or `https://` URL.
    pub fn new(value: impl Into<String>) -> Result<Self, InvalidOriginError> {
        let raw = value.into();
        let normalized = raw.trim();
        let has_scheme =
            normalized.starts_with("http://") || normalized.starts_with("https://");
        if !has_scheme || normalized.chars().any(char::is_whitespace) {
            return Err(InvalidOriginError(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Returns the origin as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Origin {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Event raised when a task is assigned to a user.
///
/// Ephemeral: the payload is consumed by the workflow and never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskAssignedEvent {
    task_id: TaskId,
    origin: Origin,
}

impl TaskAssignedEvent {
    /// Creates a new assignment event.
    #[must_use]
    pub const fn new(task_id: TaskId, origin: Origin) -> Self {
        Self { task_id, origin }
    }

    /// Returns the assigned task's identifier.
    #[must_use]
    pub const fn task_id(&self) -> TaskId {
        self.task_id
    }

    /// Returns the link origin.
    #[must_use]
    pub const fn origin(&self) -> &Origin {
        &self.origin
    }
}
