//! Unit tests for the assignment notification workflow.

use std::sync::Arc;

use crate::directory::{
    adapters::memory::InMemoryUserRepository,
    domain::{EmailAddress, UserId, UserProfile},
    ports::UserRepository,
};
use crate::notify::{
    adapters::memory::{InMemoryRuntime, RecordingMailer},
    domain::{Completion, Origin, RunOutcome, TaskAssignedEvent},
    ports::{MailerError, MockMailer},
    services::{AssignmentNotificationService, NotificationError},
};
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{
        Progress, Project, ProjectDraft, ProjectId, ProjectPriority, ProjectStatus,
    },
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{Task, TaskDraft, TaskId, TaskStatus},
    ports::TaskRepository,
};
use chrono::{DateTime, TimeZone, Utc};
use rstest::{fixture, rstest};

use super::FixedClock;

type TestService<M> = AssignmentNotificationService<
    InMemoryTaskRepository,
    InMemoryUserRepository,
    InMemoryProjectRepository,
    M,
    InMemoryRuntime<FixedClock>,
    FixedClock,
>;

struct Harness {
    tasks: Arc<InMemoryTaskRepository>,
    users: Arc<InMemoryUserRepository>,
    projects: Arc<InMemoryProjectRepository>,
    mailer: Arc<RecordingMailer>,
    runtime: Arc<InMemoryRuntime<FixedClock>>,
    clock: FixedClock,
    service: TestService<RecordingMailer>,
}

fn trigger_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn future_due() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp")
}

#[fixture]
fn harness() -> Harness {
    let clock = FixedClock::at(trigger_time());
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let mailer = Arc::new(RecordingMailer::new());
    let runtime = Arc::new(InMemoryRuntime::new(Arc::new(clock.clone())));
    let service = AssignmentNotificationService::new(
        Arc::clone(&tasks),
        Arc::clone(&users),
        Arc::clone(&projects),
        Arc::clone(&mailer),
        Arc::clone(&runtime),
        Arc::new(clock.clone()),
    );
    Harness {
        tasks,
        users,
        projects,
        mailer,
        runtime,
        clock,
        service,
    }
}

fn origin() -> Origin {
    Origin::new("https://app.example.com").expect("valid origin")
}

async fn seed_project(harness: &Harness) -> ProjectId {
    let project = Project::create(
        ProjectDraft {
            workspace_id: crate::directory::domain::WorkspaceId::new("org_1")
                .expect("valid workspace id"),
            name: "Launch".to_owned(),
            description: None,
            status: ProjectStatus::Active,
            priority: ProjectPriority::High,
            progress: Progress::default(),
            team_lead: None,
            start_date: None,
            end_date: None,
        },
        &harness.clock,
    )
    .expect("valid project");
    harness
        .projects
        .store(&project)
        .await
        .expect("project should store");
    project.id()
}

async fn seed_assignee(harness: &Harness) -> UserId {
    let id = UserId::new("user_alice").expect("valid user id");
    let profile = UserProfile::new(
        id.clone(),
        "Alice",
        EmailAddress::new("alice@example.com").expect("valid email"),
    )
    .expect("valid profile");
    harness
        .users
        .upsert(&profile)
        .await
        .expect("profile should store");
    id
}

async fn seed_task(harness: &Harness, due_date: DateTime<Utc>) -> TaskId {
    let project_id = seed_project(harness).await;
    let assignee = seed_assignee(harness).await;
    let task = Task::create(
        TaskDraft {
            project_id,
            title: "Ship the launch checklist".to_owned(),
            description: Some("Cover rollback and paging".to_owned()),
            due_date,
            status: TaskStatus::Todo,
            assignee: Some(assignee),
        },
        &harness.clock,
    )
    .expect("valid task");
    harness.tasks.store(&task).await.expect("task should store");
    task.id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn missing_task_fails_instance_without_sending(harness: Harness) {
    let event = TaskAssignedEvent::new(TaskId::new(), origin());

    let result = harness.service.run(&event).await;

    let Err(error) = result else {
        panic!("expected TaskNotFound");
    };
    assert!(matches!(error, NotificationError::TaskNotFound(_)));
    assert!(!error.is_retryable());
    assert!(harness.mailer.sent().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn task_without_assignee_fails_fast(harness: Harness) {
    let project_id = seed_project(&harness).await;
    let task = Task::create(
        TaskDraft {
            project_id,
            title: "Orphan task".to_owned(),
            description: None,
            due_date: future_due(),
            status: TaskStatus::Todo,
            assignee: None,
        },
        &harness.clock,
    )
    .expect("valid task");
    harness.tasks.store(&task).await.expect("task should store");

    let result = harness
        .service
        .run(&TaskAssignedEvent::new(task.id(), origin()))
        .await;

    let Err(error) = result else {
        panic!("expected MissingAssignee");
    };
    assert!(matches!(error, NotificationError::MissingAssignee(_)));
    assert!(!error.is_retryable());
    assert!(harness.mailer.sent().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn transient_send_failure_is_retryable_and_not_journaled(harness: Harness) {
    let task_id = seed_task(&harness, future_due()).await;
    let event = TaskAssignedEvent::new(task_id, origin());

    harness
        .mailer
        .fail_next_with(MailerError::Transient("smtp unavailable".to_owned()));
    let result = harness.service.run(&event).await;
    let Err(error) = result else {
        panic!("expected transient failure");
    };
    assert!(error.is_retryable());
    assert_eq!(harness.runtime.journal_len(), 0);

    // The caller's retry re-invokes the instance; the send now succeeds.
    let outcome = harness.service.run(&event).await.expect("retry succeeds");
    assert!(matches!(outcome, RunOutcome::Suspended { .. }));
    assert_eq!(harness.mailer.sent().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reinvocation_skips_the_journaled_assignment_step(harness: Harness) {
    let task_id = seed_task(&harness, future_due()).await;
    let event = TaskAssignedEvent::new(task_id, origin());

    let first = harness.service.run(&event).await.expect("first run");
    let second = harness.service.run(&event).await.expect("second run");

    assert!(matches!(first, RunOutcome::Suspended { .. }));
    assert!(matches!(second, RunOutcome::Suspended { .. }));
    assert_eq!(harness.mailer.sent().len(), 1);
    assert_eq!(harness.runtime.registered_timers().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_send_surfaces_as_permanent_failure(harness: Harness) {
    let task_id = seed_task(&harness, future_due()).await;
    let event = TaskAssignedEvent::new(task_id, origin());

    let mut mock_mailer = MockMailer::new();
    mock_mailer
        .expect_send()
        .returning(|_| Err(MailerError::Rejected("address blocked".to_owned())));
    let service = AssignmentNotificationService::new(
        Arc::clone(&harness.tasks),
        Arc::clone(&harness.users),
        Arc::clone(&harness.projects),
        Arc::new(mock_mailer),
        Arc::clone(&harness.runtime),
        Arc::new(harness.clock.clone()),
    );

    let result = service.run(&event).await;
    let Err(error) = result else {
        panic!("expected rejected send");
    };
    assert!(matches!(error, NotificationError::Send(_)));
    assert!(!error.is_retryable());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn resumed_instance_sends_reminder_when_task_still_open(harness: Harness) {
    let task_id = seed_task(&harness, future_due()).await;
    let event = TaskAssignedEvent::new(task_id, origin());

    let suspended = harness.service.run(&event).await.expect("initial run");
    assert!(matches!(suspended, RunOutcome::Suspended { .. }));

    harness.clock.advance_to(future_due());
    let outcome = harness.service.run(&event).await.expect("resumed run");

    assert_eq!(outcome, RunOutcome::Completed(Completion::ReminderSent));
    let sent = harness.mailer.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(
        sent.last().map(|message| message.subject.clone()),
        Some("Reminder from Launch".to_owned())
    );
}
