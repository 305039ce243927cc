//! The task-assignment notification workflow.
//!
//! One event produces one instance. Each invocation of [`run`] drives the
//! instance as far as it can and either completes or suspends on the
//! durable timer. Invocations are re-entrant: journaled steps are skipped
//! on re-invocation, so a crash or restart between steps never re-sends
//! the assignment email, and a re-delivered event collapses onto the same
//! instance without scheduling a second wait.
//!
//! [`run`]: AssignmentNotificationService::run

use crate::directory::{domain::UserId, ports::DirectoryRepositoryError, ports::UserRepository};
use crate::notify::{
    domain::{
        Completion, EmailTemplateError, NotificationPlan, RunOutcome, TaskAssignedEvent,
        TaskSnapshot, WorkflowInstanceId, compose_assignment, compose_reminder,
    },
    ports::{DurableRuntime, Mailer, MailerError, RuntimeError, SleepStatus},
};
use crate::project::{
    domain::ProjectId,
    ports::{ProjectRepository, ProjectRepositoryError},
};
use crate::task::{
    domain::{Task, TaskId},
    ports::{TaskRepository, TaskRepositoryError},
};
use mockable::Clock;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Journaled step that sends the assignment email and records the plan.
pub const STEP_SEND_ASSIGNMENT: &str = "send-assignment-email";

/// Durable timer step that waits for the due date.
pub const STEP_WAIT_FOR_DUE_DATE: &str = "wait-for-due-date";

/// Journaled step that re-checks the task and conditionally reminds.
pub const STEP_CHECK_AND_REMIND: &str = "check-task-and-remind";

/// Errors surfaced by the notification workflow.
///
/// The workflow performs no local recovery: every failure propagates to the
/// caller, which owns retry policy. [`NotificationError::is_retryable`]
/// tells the caller which failures are worth retrying.
#[derive(Debug, Error)]
pub enum NotificationError {
    /// The initial lookup found no task for the event.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The task exists but carries no assignee.
    #[error("task {0} has no assignee")]
    MissingAssignee(TaskId),

    /// The task references an assignee the directory does not know.
    #[error("assignee {user} of task {task} not found")]
    AssigneeNotFound {
        /// Referenced task.
        task: TaskId,
        /// Missing assignee.
        user: UserId,
    },

    /// The task references a project that does not exist.
    #[error("project {project} of task {task} not found")]
    ProjectNotFound {
        /// Referenced task.
        task: TaskId,
        /// Missing project.
        project: ProjectId,
    },

    /// A journal record could not be decoded.
    #[error("corrupt journal record for step '{step}': {reason}")]
    CorruptJournal {
        /// Step whose record failed to decode.
        step: String,
        /// Decoder-provided failure description.
        reason: String,
    },

    /// Email template rendering failed.
    #[error(transparent)]
    Template(#[from] EmailTemplateError),

    /// Mail delivery failed.
    #[error(transparent)]
    Send(#[from] MailerError),

    /// Durable-runtime operation failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// Task repository operation failed.
    #[error(transparent)]
    Tasks(#[from] TaskRepositoryError),

    /// Directory repository operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),

    /// Project repository operation failed.
    #[error(transparent)]
    Projects(#[from] ProjectRepositoryError),
}

impl NotificationError {
    /// Returns `true` when retrying the instance may succeed.
    ///
    /// Missing or inconsistent data will not heal on retry; transient
    /// delivery and persistence failures might.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::TaskNotFound(_)
            | Self::MissingAssignee(_)
            | Self::AssigneeNotFound { .. }
            | Self::ProjectNotFound { .. }
            | Self::CorruptJournal { .. }
            | Self::Template(_) => false,
            Self::Send(err) => err.is_retryable(),
            Self::Runtime(_) | Self::Tasks(_) | Self::Directory(_) | Self::Projects(_) => true,
        }
    }
}

/// Task-assignment notification workflow service.
///
/// The service only reads: it never writes to the task record, and all
/// state that must survive restarts lives behind the durable runtime port.
#[derive(Clone)]
pub struct AssignmentNotificationService<T, U, P, M, R, C>
where
    T: TaskRepository,
    U: UserRepository,
    P: ProjectRepository,
    M: Mailer,
    R: DurableRuntime,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    users: Arc<U>,
    projects: Arc<P>,
    mailer: Arc<M>,
    runtime: Arc<R>,
    clock: Arc<C>,
}

impl<T, U, P, M, R, C> AssignmentNotificationService<T, U, P, M, R, C>
where
    T: TaskRepository,
    U: UserRepository,
    P: ProjectRepository,
    M: Mailer,
    R: DurableRuntime,
    C: Clock + Send + Sync,
{
    /// Creates a new assignment notification service.
    #[must_use]
    pub const fn new(
        tasks: Arc<T>,
        users: Arc<U>,
        projects: Arc<P>,
        mailer: Arc<M>,
        runtime: Arc<R>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            users,
            projects,
            mailer,
            runtime,
            clock,
        }
    }

    /// Drives the workflow instance for an assignment event.
    ///
    /// Returns [`RunOutcome::Suspended`] when the instance registered its
    /// durable timer and must be re-invoked at or after the due date;
    /// returns [`RunOutcome::Completed`] otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`NotificationError::TaskNotFound`] when the initial lookup
    /// misses, a data-inconsistency error when the task's assignee or
    /// project cannot be resolved, and transient send/runtime errors for
    /// the caller's retry policy. See
    /// [`NotificationError::is_retryable`].
    pub async fn run(&self, event: &TaskAssignedEvent) -> Result<RunOutcome, NotificationError> {
        let instance = WorkflowInstanceId::for_event(event);

        let plan = match self
            .runtime
            .recorded_step(instance, STEP_SEND_ASSIGNMENT)
            .await?
        {
            Some(value) => decode_step(STEP_SEND_ASSIGNMENT, value)?,
            None => self.send_assignment(instance, event).await?,
        };

        let NotificationPlan::ImmediateThenReminder { resume_at } = plan else {
            return Ok(RunOutcome::Completed(Completion::AssignmentOnly));
        };

        let status = self
            .runtime
            .sleep_until(instance, STEP_WAIT_FOR_DUE_DATE, resume_at)
            .await?;
        if status == SleepStatus::Pending {
            info!(
                instance = %instance,
                resume_at = %resume_at,
                "workflow suspended until due date"
            );
            return Ok(RunOutcome::Suspended { resume_at });
        }

        if let Some(value) = self
            .runtime
            .recorded_step(instance, STEP_CHECK_AND_REMIND)
            .await?
        {
            return Ok(RunOutcome::Completed(decode_step(
                STEP_CHECK_AND_REMIND,
                value,
            )?));
        }

        let completion = self.check_and_remind(event).await?;
        self.record_step(instance, STEP_CHECK_AND_REMIND, &completion)
            .await?;
        Ok(RunOutcome::Completed(completion))
    }

    /// Sends the assignment email and journals the chosen plan.
    ///
    /// The send happens before the journal write, so a crash in between
    /// re-sends on the next invocation. That is the accepted cost of
    /// at-least-once execution.
    async fn send_assignment(
        &self,
        instance: WorkflowInstanceId,
        event: &TaskAssignedEvent,
    ) -> Result<NotificationPlan, NotificationError> {
        let task = self
            .tasks
            .find_by_id(event.task_id())
            .await?
            .ok_or(NotificationError::TaskNotFound(event.task_id()))?;
        let snapshot = self.resolve_snapshot(&task).await?;

        let message = compose_assignment(&snapshot, event.origin())?;
        self.mailer.send(&message).await?;

        let plan = NotificationPlan::for_due_date(snapshot.due_date, &*self.clock);
        self.record_step(instance, STEP_SEND_ASSIGNMENT, &plan)
            .await?;
        info!(
            instance = %instance,
            task = %event.task_id(),
            to = %snapshot.assignee_email,
            "assignment email sent"
        );
        Ok(plan)
    }

    /// Re-reads the task after the wait and decides the reminder.
    ///
    /// The read is independent of the pre-wait snapshot: the task may have
    /// been completed, re-assigned, or deleted while the instance slept.
    async fn check_and_remind(
        &self,
        event: &TaskAssignedEvent,
    ) -> Result<Completion, NotificationError> {
        let Some(task) = self.tasks.find_by_id(event.task_id()).await? else {
            warn!(task = %event.task_id(), "task deleted before due date, no reminder");
            return Ok(Completion::TaskDeleted);
        };

        if task.is_done() {
            info!(task = %task.id(), "task already done, no reminder");
            return Ok(Completion::AlreadyDone);
        }

        let snapshot = self.resolve_snapshot(&task).await?;
        let message = compose_reminder(&snapshot, event.origin())?;
        self.mailer.send(&message).await?;
        info!(
            task = %task.id(),
            to = %snapshot.assignee_email,
            "reminder email sent"
        );
        Ok(Completion::ReminderSent)
    }

    /// Resolves the task's assignee and project into a composition
    /// snapshot, failing fast on dangling references.
    async fn resolve_snapshot(&self, task: &Task) -> Result<TaskSnapshot, NotificationError> {
        let assignee_id = task
            .assignee()
            .ok_or(NotificationError::MissingAssignee(task.id()))?;
        let assignee = self
            .users
            .find_by_id(assignee_id)
            .await?
            .ok_or_else(|| NotificationError::AssigneeNotFound {
                task: task.id(),
                user: assignee_id.clone(),
            })?;
        let project = self
            .projects
            .find_by_id(task.project_id())
            .await?
            .ok_or(NotificationError::ProjectNotFound {
                task: task.id(),
                project: task.project_id(),
            })?;

        Ok(TaskSnapshot {
            task_id: task.id(),
            title: task.title().to_owned(),
            description: task.description().map(ToOwned::to_owned),
            due_date: task.due_date(),
            status: task.status(),
            assignee_name: assignee.name().to_owned(),
            assignee_email: assignee.email().clone(),
            project_name: project.name().to_owned(),
        })
    }

    async fn record_step<S>(
        &self,
        instance: WorkflowInstanceId,
        step: &str,
        output: &S,
    ) -> Result<(), NotificationError>
    where
        S: Serialize + Sync,
    {
        let value = serde_json::to_value(output).map_err(|err| {
            NotificationError::CorruptJournal {
                step: step.to_owned(),
                reason: err.to_string(),
            }
        })?;
        self.runtime.record_step(instance, step, value).await?;
        Ok(())
    }
}

fn decode_step<D>(step: &str, value: Value) -> Result<D, NotificationError>
where
    D: serde::de::DeserializeOwned,
{
    serde_json::from_value(value).map_err(|err| NotificationError::CorruptJournal {
        step: step.to_owned(),
        reason: err.to_string(),
    })
}
