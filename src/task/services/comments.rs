//! Service layer for task comments.

use crate::directory::domain::UserId;
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Comment, TaskDomainError, TaskId},
    ports::{CommentRepository, TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for comment operations.
#[derive(Debug, Error)]
pub enum CommentError {
    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task's project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The author is not a member of the task's project.
    #[error("user {user} is not a member of project {project}")]
    NotProjectMember {
        /// Author user identifier.
        user: UserId,
        /// Project identifier.
        project: ProjectId,
    },

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),

    /// Project repository operation failed.
    #[error(transparent)]
    Project(#[from] ProjectRepositoryError),
}

/// Comment orchestration service.
#[derive(Clone)]
pub struct CommentService<T, P, R, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    comments: Arc<R>,
    clock: Arc<C>,
}

impl<T, P, R, C> CommentService<T, P, R, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    R: CommentRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new comment service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, comments: Arc<R>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            comments,
            clock,
        }
    }

    /// Adds a comment to a task on behalf of a project member.
    ///
    /// The task is resolved first, then its project, then the author's
    /// membership; each failure carries a distinct error.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError::TaskNotFound`],
    /// [`CommentError::ProjectNotFound`], or
    /// [`CommentError::NotProjectMember`] for the respective lookup
    /// failures.
    pub async fn add_comment(
        &self,
        task_id: TaskId,
        author: &UserId,
        content: impl Into<String> + Send,
    ) -> Result<Comment, CommentError> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(CommentError::TaskNotFound(task_id))?;

        let project = self
            .projects
            .find_by_id(task.project_id())
            .await?
            .ok_or(CommentError::ProjectNotFound(task.project_id()))?;

        if !self.projects.is_member(project.id(), author).await? {
            return Err(CommentError::NotProjectMember {
                user: author.clone(),
                project: project.id(),
            });
        }

        let comment = Comment::new(task_id, author.clone(), content, &*self.clock)?;
        self.comments.store(&comment).await?;
        Ok(comment)
    }

    /// Returns all comments of a task in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`CommentError::Repository`] when the lookup fails.
    pub async fn list_for_task(&self, task_id: TaskId) -> Result<Vec<Comment>, CommentError> {
        Ok(self.comments.list_for_task(task_id).await?)
    }
}
