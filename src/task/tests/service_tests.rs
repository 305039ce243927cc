//! Service orchestration tests for task lifecycle and event publication.

use std::sync::Arc;

use crate::directory::domain::{UserId, WorkspaceId};
use crate::notify::adapters::memory::InMemoryAssignmentEvents;
use crate::notify::domain::Origin;
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Progress, Project, ProjectDraft, ProjectId, ProjectMember, ProjectPriority,
        ProjectStatus},
    ports::ProjectRepository,
};
use crate::task::{
    adapters::memory::InMemoryTaskRepository,
    domain::{TaskStatus, TaskUpdate},
    services::{CreateTaskRequest, TaskLifecycleError, TaskLifecycleService, UpdateTaskRequest},
};
use chrono::{DateTime, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = TaskLifecycleService<
    InMemoryTaskRepository,
    InMemoryProjectRepository,
    InMemoryAssignmentEvents,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    projects: Arc<InMemoryProjectRepository>,
    events: Arc<InMemoryAssignmentEvents>,
}

#[fixture]
fn harness() -> Harness {
    let tasks = Arc::new(InMemoryTaskRepository::new());
    let projects = Arc::new(InMemoryProjectRepository::new());
    let events = Arc::new(InMemoryAssignmentEvents::new());
    let service = TaskLifecycleService::new(
        tasks,
        Arc::clone(&projects),
        Arc::clone(&events),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        projects,
        events,
    }
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn due_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn origin() -> Origin {
    Origin::new("https://app.example.com").expect("valid origin")
}

async fn seed_project(harness: &Harness, members: &[&str]) -> ProjectId {
    let project = Project::create(
        ProjectDraft {
            workspace_id: WorkspaceId::new("org_1").expect("valid workspace id"),
            name: "Launch".to_owned(),
            description: None,
            status: ProjectStatus::Active,
            priority: ProjectPriority::Medium,
            progress: Progress::default(),
            team_lead: None,
            start_date: None,
            end_date: None,
        },
        &DefaultClock,
    )
    .expect("valid project");
    harness
        .projects
        .store(&project)
        .await
        .expect("project should store");
    for member in members {
        harness
            .projects
            .add_member(&ProjectMember::new(
                project.id(),
                user_id(member),
                &DefaultClock,
            ))
            .await
            .expect("membership should store");
    }
    project.id()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_assigned_task_publishes_event(harness: Harness) {
    let project_id = seed_project(&harness, &["user_member", "user_alice"]).await;

    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new(
                project_id,
                user_id("user_member"),
                "Ship it",
                due_date(),
                origin(),
            )
            .with_assignee(user_id("user_alice")),
        )
        .await
        .expect("creation should succeed");

    let events = harness.events.drain();
    assert_eq!(events.len(), 1);
    assert_eq!(
        events.first().map(crate::notify::domain::TaskAssignedEvent::task_id),
        Some(task.id())
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn creating_unassigned_task_publishes_nothing(harness: Harness) {
    let project_id = seed_project(&harness, &["user_member"]).await;

    harness
        .service
        .create_task(CreateTaskRequest::new(
            project_id,
            user_id("user_member"),
            "Ship it",
            due_date(),
            origin(),
        ))
        .await
        .expect("creation should succeed");

    assert!(harness.events.drain().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_member_cannot_create_tasks(harness: Harness) {
    let project_id = seed_project(&harness, &["user_member"]).await;

    let result = harness
        .service
        .create_task(CreateTaskRequest::new(
            project_id,
            user_id("user_outsider"),
            "Sneaky task",
            due_date(),
            origin(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::NotProjectMember { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unchanged_assignee_does_not_republish(harness: Harness) {
    let project_id = seed_project(&harness, &["user_member", "user_alice"]).await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new(
                project_id,
                user_id("user_member"),
                "Ship it",
                due_date(),
                origin(),
            )
            .with_assignee(user_id("user_alice")),
        )
        .await
        .expect("creation should succeed");
    let _initial = harness.events.drain();

    harness
        .service
        .update_task(UpdateTaskRequest {
            task_id: task.id(),
            acting_user: user_id("user_member"),
            update: TaskUpdate {
                title: "Ship it".to_owned(),
                description: None,
                due_date: due_date(),
                status: TaskStatus::InProgress,
                assignee: Some(user_id("user_alice")),
            },
            origin: origin(),
        })
        .await
        .expect("update should succeed");

    assert!(harness.events.drain().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn handing_task_to_new_assignee_republishes(harness: Harness) {
    let project_id = seed_project(&harness, &["user_member", "user_alice", "user_bob"]).await;
    let task = harness
        .service
        .create_task(
            CreateTaskRequest::new(
                project_id,
                user_id("user_member"),
                "Ship it",
                due_date(),
                origin(),
            )
            .with_assignee(user_id("user_alice")),
        )
        .await
        .expect("creation should succeed");
    let _initial = harness.events.drain();

    harness
        .service
        .update_task(UpdateTaskRequest {
            task_id: task.id(),
            acting_user: user_id("user_member"),
            update: TaskUpdate {
                title: "Ship it".to_owned(),
                description: None,
                due_date: due_date(),
                status: TaskStatus::InProgress,
                assignee: Some(user_id("user_bob")),
            },
            origin: origin(),
        })
        .await
        .expect("update should succeed");

    assert_eq!(harness.events.drain().len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn removing_missing_task_reports_not_found(harness: Harness) {
    let _project_id = seed_project(&harness, &["user_member"]).await;

    let result = harness
        .service
        .remove_task(crate::task::domain::TaskId::new(), &user_id("user_member"))
        .await;

    assert!(matches!(result, Err(TaskLifecycleError::TaskNotFound(_))));
}
