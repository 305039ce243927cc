//! Repository port for project persistence and membership management.

use crate::directory::domain::{UserId, WorkspaceId};
use crate::project::domain::{Project, ProjectId, ProjectMember};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for project repository operations.
pub type ProjectRepositoryResult<T> = Result<T, ProjectRepositoryError>;

/// Project persistence contract.
#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Stores a new project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateProject`] when the project
    /// ID already exists.
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Persists changes to an existing project.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::NotFound`] when the project does
    /// not exist.
    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()>;

    /// Finds a project by identifier.
    ///
    /// Returns `None` when the project does not exist.
    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>>;

    /// Returns all projects of a workspace.
    async fn list_for_workspace(
        &self,
        workspace: &WorkspaceId,
    ) -> ProjectRepositoryResult<Vec<Project>>;

    /// Records a new project membership.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectRepositoryError::DuplicateMember`] when the user is
    /// already a member.
    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()>;

    /// Returns all memberships of a project.
    async fn list_members(
        &self,
        project: ProjectId,
    ) -> ProjectRepositoryResult<Vec<ProjectMember>>;

    /// Returns `true` when the user is a member of the project.
    async fn is_member(
        &self,
        project: ProjectId,
        user: &UserId,
    ) -> ProjectRepositoryResult<bool>;
}

/// Errors returned by project repository implementations.
#[derive(Debug, Clone, Error)]
pub enum ProjectRepositoryError {
    /// A project with the same identifier already exists.
    #[error("duplicate project identifier: {0}")]
    DuplicateProject(ProjectId),

    /// The project was not found.
    #[error("project not found: {0}")]
    NotFound(ProjectId),

    /// The user is already a member of the project.
    #[error("user {user} is already a member of project {project}")]
    DuplicateMember {
        /// Member user identifier.
        user: UserId,
        /// Project identifier.
        project: ProjectId,
    },

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProjectRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
