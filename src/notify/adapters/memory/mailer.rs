//! Recording mailer for tests.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::notify::{
    domain::EmailMessage,
    ports::{Mailer, MailerError},
};

/// Mailer that captures sent messages instead of delivering them.
///
/// A failure can be injected for the next send to exercise the workflow's
/// error propagation.
#[derive(Debug, Clone, Default)]
pub struct RecordingMailer {
    state: Arc<RwLock<RecordingMailerState>>,
}

#[derive(Debug, Default)]
struct RecordingMailerState {
    sent: Vec<EmailMessage>,
    next_failure: Option<MailerError>,
}

impl RecordingMailer {
    /// Creates an empty recording mailer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes the next send fail with the given error.
    pub fn fail_next_with(&self, error: MailerError) {
        if let Ok(mut state) = self.state.write() {
            state.next_failure = Some(error);
        }
    }

    /// Returns all messages sent so far.
    #[must_use]
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.state
            .read()
            .map(|state| state.sent.clone())
            .unwrap_or_default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> MailerError {
    MailerError::Transient(err.to_string())
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), MailerError> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(failure) = state.next_failure.take() {
            return Err(failure);
        }
        state.sent.push(message.clone());
        Ok(())
    }
}
