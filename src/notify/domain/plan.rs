//! Notification plan and workflow outcomes.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Shape of one workflow instance, chosen exactly once at start.
///
/// Keeping the choice explicit (rather than branching inline later) makes
/// the instance auditable: the journaled plan states up front whether a
/// reminder was ever on the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "plan", rename_all = "snake_case")]
pub enum NotificationPlan {
    /// The task is due on the trigger's calendar day: send the assignment
    /// email and stop. No reminder is ever scheduled.
    ImmediateOnly,
    /// The task is due on a later (or earlier) calendar day: send the
    /// assignment email, then wait and re-check at the due date.
    ImmediateThenReminder {
        /// When the workflow resumes for the reminder check.
        resume_at: DateTime<Utc>,
    },
}

impl NotificationPlan {
    /// Chooses the plan by comparing the due date's calendar day to today.
    #[must_use]
    pub fn for_due_date(due_date: DateTime<Utc>, clock: &impl Clock) -> Self {
        if due_date.date_naive() == clock.utc().date_naive() {
            Self::ImmediateOnly
        } else {
            Self::ImmediateThenReminder {
                resume_at: due_date,
            }
        }
    }
}

/// How a completed workflow instance ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    /// Same-day due date: only the assignment email was sent.
    AssignmentOnly,
    /// The reminder email was sent at the due date.
    ReminderSent,
    /// The task was already done at the due date; no reminder sent.
    AlreadyDone,
    /// The task was deleted during the wait; terminated silently.
    TaskDeleted,
}

/// Result of driving a workflow instance one step forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The instance ran to completion.
    Completed(Completion),
    /// The instance registered a durable timer and suspended; the caller
    /// re-invokes it at or after `resume_at`.
    Suspended {
        /// Earliest wall-clock time the instance should be re-invoked.
        resume_at: DateTime<Utc>,
    },
}
