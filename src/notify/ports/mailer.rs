//! Mail delivery port.

use crate::notify::domain::EmailMessage;
use async_trait::async_trait;
use thiserror::Error;

/// Errors returned by mail delivery implementations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MailerError {
    /// Delivery failed for a reason that may clear up on retry.
    #[error("transient mail delivery failure: {0}")]
    Transient(String),

    /// The message was rejected outright; retrying will not help.
    #[error("mail rejected: {0}")]
    Rejected(String),
}

impl MailerError {
    /// Returns `true` for failures worth retrying.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Transient(_))
    }
}

/// Outbound mail delivery contract.
///
/// Implementations are expected to be safe under at-least-once execution:
/// the workflow may re-send a message whose previous delivery outcome was
/// lost, and duplicate sends are tolerated.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one email.
    ///
    /// # Errors
    ///
    /// Returns [`MailerError::Transient`] for recoverable delivery failures
    /// and [`MailerError::Rejected`] for permanent ones.
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError>;
}
