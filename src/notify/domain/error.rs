//! Error types for notification domain values.

use thiserror::Error;

/// Error returned when an email template fails to render.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("email template rendering failed: {reason}")]
pub struct EmailTemplateError {
    /// Renderer-provided failure description.
    pub reason: String,
}
