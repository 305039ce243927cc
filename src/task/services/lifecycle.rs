//! Service layer for task creation, update, and removal.
//!
//! Task mutation is gated on project membership. Setting an assignee at
//! creation or handing a task to a new assignee on update publishes a
//! [`TaskAssignedEvent`] through the assignment-event port; the notification
//! workflow picks it up from there.

use crate::directory::domain::UserId;
use crate::notify::domain::{Origin, TaskAssignedEvent};
use crate::notify::ports::{AssignmentEventSink, EventSinkError};
use crate::project::{domain::ProjectId, ports::ProjectRepository, ports::ProjectRepositoryError};
use crate::task::{
    domain::{Task, TaskDomainError, TaskDraft, TaskId, TaskStatus, TaskUpdate},
    ports::{TaskRepository, TaskRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTaskRequest {
    project_id: ProjectId,
    acting_user: UserId,
    title: String,
    description: Option<String>,
    due_date: DateTime<Utc>,
    status: TaskStatus,
    assignee: Option<UserId>,
    origin: Origin,
}

impl CreateTaskRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        project_id: ProjectId,
        acting_user: UserId,
        title: impl Into<String>,
        due_date: DateTime<Utc>,
        origin: Origin,
    ) -> Self {
        Self {
            project_id,
            acting_user,
            title: title.into(),
            description: None,
            due_date,
            status: TaskStatus::Todo,
            assignee: None,
            origin,
        }
    }

    /// Sets the task description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the initial status.
    #[must_use]
    pub const fn with_status(mut self, status: TaskStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the assignee.
    #[must_use]
    pub fn with_assignee(mut self, assignee: UserId) -> Self {
        self.assignee = Some(assignee);
        self
    }
}

/// Request payload for updating a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateTaskRequest {
    /// Task to update.
    pub task_id: TaskId,
    /// User performing the update.
    pub acting_user: UserId,
    /// Replacement field values.
    pub update: TaskUpdate,
    /// Link origin used when the update publishes an assignment event.
    pub origin: Origin,
}

/// Service-level errors for task lifecycle operations.
#[derive(Debug, Error)]
pub enum TaskLifecycleError {
    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The task does not exist.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The acting user is not a member of the project.
    #[error("user {user} is not a member of project {project}")]
    NotProjectMember {
        /// Acting user identifier.
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

    /// Assignment event delivery failed.
    #[error(transparent)]
    Events(#[from] EventSinkError),
}

/// Result type for task lifecycle service operations.
pub type TaskLifecycleResult<T> = Result<T, TaskLifecycleError>;

/// Task lifecycle orchestration service.
#[derive(Clone)]
pub struct TaskLifecycleService<T, P, E, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    E: AssignmentEventSink,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    projects: Arc<P>,
    events: Arc<E>,
    clock: Arc<C>,
}

impl<T, P, E, C> TaskLifecycleService<T, P, E, C>
where
    T: TaskRepository,
    P: ProjectRepository,
    E: AssignmentEventSink,
    C: Clock + Send + Sync,
{
    /// Creates a new task lifecycle service.
    #[must_use]
    pub const fn new(tasks: Arc<T>, projects: Arc<P>, events: Arc<E>, clock: Arc<C>) -> Self {
        Self {
            tasks,
            projects,
            events,
            clock,
        }
    }

    /// Creates a task in a project on behalf of a project member.
    ///
    /// When the draft carries an assignee, a [`TaskAssignedEvent`] is
    /// published after the task is stored.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::ProjectNotFound`] when the project does
    /// not exist and [`TaskLifecycleError::NotProjectMember`] when the
    /// acting user does not belong to it.
    pub async fn create_task(&self, request: CreateTaskRequest) -> TaskLifecycleResult<Task> {
        self.ensure_project_member(request.project_id, &request.acting_user)
            .await?;

        let has_assignee = request.assignee.is_some();
        let draft = TaskDraft {
            project_id: request.project_id,
            title: request.title,
            description: request.description,
            due_date: request.due_date,
            status: request.status,
            assignee: request.assignee,
        };
        let task = Task::create(draft, &*self.clock)?;
        self.tasks.store(&task).await?;

        if has_assignee {
            self.publish_assignment(&task, request.origin).await?;
        }
        Ok(task)
    }

    /// Updates a task's fields on behalf of a project member.
    ///
    /// Handing the task to a different assignee publishes a fresh
    /// [`TaskAssignedEvent`]; clearing the assignee or leaving it unchanged
    /// does not.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist and [`TaskLifecycleError::NotProjectMember`] when the acting
    /// user does not belong to the owning project.
    pub async fn update_task(&self, request: UpdateTaskRequest) -> TaskLifecycleResult<Task> {
        let mut task = self
            .tasks
            .find_by_id(request.task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(request.task_id))?;
        self.ensure_project_member(task.project_id(), &request.acting_user)
            .await?;

        let previous_assignee = task.assignee().cloned();
        task.apply_update(request.update, &*self.clock)?;
        self.tasks.update(&task).await?;

        let newly_assigned = task
            .assignee()
            .is_some_and(|assignee| previous_assignee.as_ref() != Some(assignee));
        if newly_assigned {
            self.publish_assignment(&task, request.origin).await?;
        }
        Ok(task)
    }

    /// Removes a task on behalf of a project member.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::TaskNotFound`] when the task does not
    /// exist and [`TaskLifecycleError::NotProjectMember`] when the acting
    /// user does not belong to the owning project.
    pub async fn remove_task(
        &self,
        task_id: TaskId,
        acting_user: &UserId,
    ) -> TaskLifecycleResult<()> {
        let task = self
            .tasks
            .find_by_id(task_id)
            .await?
            .ok_or(TaskLifecycleError::TaskNotFound(task_id))?;
        self.ensure_project_member(task.project_id(), acting_user)
            .await?;
        self.tasks.remove(task_id).await?;
        Ok(())
    }

    /// Returns all tasks of a project.
    ///
    /// # Errors
    ///
    /// Returns [`TaskLifecycleError::Repository`] when the lookup fails.
    pub async fn list_for_project(&self, project: ProjectId) -> TaskLifecycleResult<Vec<Task>> {
        Ok(self.tasks.list_for_project(project).await?)
    }

    async fn ensure_project_member(
        &self,
        project_id: ProjectId,
        user: &UserId,
    ) -> TaskLifecycleResult<()> {
        if self.projects.find_by_id(project_id).await?.is_none() {
            return Err(TaskLifecycleError::ProjectNotFound(project_id));
        }
        if !self.projects.is_member(project_id, user).await? {
            return Err(TaskLifecycleError::NotProjectMember {
                user: user.clone(),
                project: project_id,
            });
        }
        Ok(())
    }

    async fn publish_assignment(&self, task: &Task, origin: Origin) -> TaskLifecycleResult<()> {
        let event = TaskAssignedEvent::new(task.id(), origin);
        self.events.publish(&event).await?;
        info!(task = %task.id(), "assignment event published");
        Ok(())
    }
}
