//! Error types for directory domain validation and parsing.

use thiserror::Error;

/// Errors returned while constructing directory domain values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryDomainError {
    /// The provider-issued user identifier is empty after trimming.
    #[error("user identifier must not be empty")]
    EmptyUserId,

    /// The provider-issued workspace identifier is empty after trimming.
    #[error("workspace identifier must not be empty")]
    EmptyWorkspaceId,

    /// The email address is not structurally valid.
    #[error("invalid email address: {0}")]
    InvalidEmail(String),

    /// The user display name is empty after trimming.
    #[error("user name must not be empty")]
    EmptyUserName,

    /// The workspace name is empty after trimming.
    #[error("workspace name must not be empty")]
    EmptyWorkspaceName,
}

/// Error returned while parsing member roles from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown member role: {0}")]
pub struct ParseMemberRoleError(pub String);
