//! Repository ports for user profiles, workspaces, and memberships.

use crate::directory::domain::{
    EmailAddress, UserId, UserProfile, Workspace, WorkspaceId, WorkspaceMember,
};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for directory repository operations.
pub type DirectoryRepositoryResult<T> = Result<T, DirectoryRepositoryError>;

/// User profile persistence contract.
///
/// Profiles mirror the identity provider, so writes are upserts: the
/// provider is the source of truth and re-delivered events must converge.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Creates or replaces a user profile.
    async fn upsert(&self, profile: &UserProfile) -> DirectoryRepositoryResult<()>;

    /// Removes a user profile.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::UserNotFound`] when no profile
    /// exists for the identifier.
    async fn remove(&self, id: &UserId) -> DirectoryRepositoryResult<()>;

    /// Finds a profile by identifier.
    ///
    /// Returns `None` when the user is unknown.
    async fn find_by_id(&self, id: &UserId) -> DirectoryRepositoryResult<Option<UserProfile>>;

    /// Finds a profile by email address.
    ///
    /// Returns `None` when no profile carries the address.
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> DirectoryRepositoryResult<Option<UserProfile>>;
}

/// Workspace and membership persistence contract.
#[async_trait]
pub trait WorkspaceRepository: Send + Sync {
    /// Stores a new workspace.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateWorkspace`] when the
    /// identifier already exists.
    async fn store(&self, workspace: &Workspace) -> DirectoryRepositoryResult<()>;

    /// Persists changes to an existing workspace.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::WorkspaceNotFound`] when the
    /// workspace does not exist.
    async fn update(&self, workspace: &Workspace) -> DirectoryRepositoryResult<()>;

    /// Removes a workspace together with its memberships.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::WorkspaceNotFound`] when the
    /// workspace does not exist.
    async fn remove(&self, id: &WorkspaceId) -> DirectoryRepositoryResult<()>;

    /// Finds a workspace by identifier.
    ///
    /// Returns `None` when the workspace is unknown.
    async fn find_by_id(
        &self,
        id: &WorkspaceId,
    ) -> DirectoryRepositoryResult<Option<Workspace>>;

    /// Returns all workspaces in which the user holds a membership.
    async fn list_for_user(&self, user: &UserId) -> DirectoryRepositoryResult<Vec<Workspace>>;

    /// Records a new membership.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryRepositoryError::DuplicateMember`] when the user
    /// already belongs to the workspace.
    async fn add_member(&self, member: &WorkspaceMember) -> DirectoryRepositoryResult<()>;

    /// Finds a membership record.
    ///
    /// Returns `None` when the user does not belong to the workspace.
    async fn find_member(
        &self,
        workspace: &WorkspaceId,
        user: &UserId,
    ) -> DirectoryRepositoryResult<Option<WorkspaceMember>>;

    /// Returns all memberships of a workspace.
    async fn list_members(
        &self,
        workspace: &WorkspaceId,
    ) -> DirectoryRepositoryResult<Vec<WorkspaceMember>>;
}

/// Errors returned by directory repository implementations.
#[derive(Debug, Clone, Error)]
pub enum DirectoryRepositoryError {
    /// The user was not found.
    #[error("user not found: {0}")]
    UserNotFound(UserId),

    /// The workspace was not found.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// A workspace with the same identifier already exists.
    #[error("duplicate workspace identifier: {0}")]
    DuplicateWorkspace(WorkspaceId),

    /// The user already belongs to the workspace.
    #[error("user {user} is already a member of workspace {workspace}")]
    DuplicateMember {
        /// Member user identifier.
        user: UserId,
        /// Workspace identifier.
        workspace: WorkspaceId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl DirectoryRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
