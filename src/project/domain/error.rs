//! Error types for project domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing project domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProjectDomainError {
    /// The project name is empty after trimming.
    #[error("project name must not be empty")]
    EmptyProjectName,

    /// The progress percentage exceeds 100.
    #[error("invalid progress {0}, expected a percentage between 0 and 100")]
    InvalidProgress(u8),
}

/// Error returned while parsing project statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project status: {0}")]
pub struct ParseProjectStatusError(pub String);

/// Error returned while parsing project priorities from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown project priority: {0}")]
pub struct ParseProjectPriorityError(pub String);
