//! Port contracts for the notification workflow's collaborators.

mod events;
mod mailer;
mod runtime;

pub use events::{AssignmentEventSink, EventSinkError};
pub use mailer::{Mailer, MailerError};
pub use runtime::{DurableRuntime, RuntimeError, SleepStatus};

#[cfg(test)]
pub use mailer::MockMailer;
