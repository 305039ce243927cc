//! Cross-context access-control tests against in-memory adapters.
//!
//! Drives the full tenant flow: identity sync provisions a workspace, the
//! admin invites members, projects gate creation on the ADMIN role, tasks
//! and comments gate mutation on project membership.

mod support;

use std::sync::Arc;

use atelier::directory::{
    adapters::memory::{InMemoryUserRepository, InMemoryWorkspaceRepository},
    domain::{EmailAddress, MemberRole, UserId, WorkspaceId},
    services::{AddMemberRequest, IdentityEvent, IdentitySyncService, MembershipService},
};
use atelier::notify::{
    adapters::memory::InMemoryAssignmentEvents,
    domain::Origin,
};
use atelier::project::{
    adapters::memory::InMemoryProjectRepository,
    services::{CreateProjectRequest, ProjectLifecycleError, ProjectLifecycleService},
};
use atelier::task::{
    adapters::memory::{InMemoryCommentRepository, InMemoryTaskRepository},
    services::{CommentError, CommentService, CreateTaskRequest, TaskLifecycleError,
        TaskLifecycleService},
};
use chrono::{TimeZone, Utc};
use eyre::ensure;
use rstest::rstest;
use support::FixedClock;

struct World {
    clock: Arc<FixedClock>,
    users: Arc<InMemoryUserRepository>,
    workspaces: Arc<InMemoryWorkspaceRepository>,
    projects: Arc<InMemoryProjectRepository>,
    tasks: Arc<InMemoryTaskRepository>,
    comments: Arc<InMemoryCommentRepository>,
    events: Arc<InMemoryAssignmentEvents>,
}

impl World {
    fn new() -> Self {
        let clock = Arc::new(FixedClock::at(
            Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0)
                .single()
                .expect("valid timestamp"),
        ));
        Self {
            clock,
            users: Arc::new(InMemoryUserRepository::new()),
            workspaces: Arc::new(InMemoryWorkspaceRepository::new()),
            projects: Arc::new(InMemoryProjectRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
            comments: Arc::new(InMemoryCommentRepository::new()),
            events: Arc::new(InMemoryAssignmentEvents::new()),
        }
    }

    fn identity_sync(
        &self,
    ) -> IdentitySyncService<InMemoryUserRepository, InMemoryWorkspaceRepository, FixedClock> {
        IdentitySyncService::new(
            Arc::clone(&self.users),
            Arc::clone(&self.workspaces),
            Arc::clone(&self.clock),
        )
    }

    fn membership(
        &self,
    ) -> MembershipService<InMemoryUserRepository, InMemoryWorkspaceRepository, FixedClock> {
        MembershipService::new(
            Arc::clone(&self.users),
            Arc::clone(&self.workspaces),
            Arc::clone(&self.clock),
        )
    }

    fn project_service(
        &self,
    ) -> ProjectLifecycleService<
        InMemoryProjectRepository,
        InMemoryWorkspaceRepository,
        InMemoryUserRepository,
        FixedClock,
    > {
        ProjectLifecycleService::new(
            Arc::clone(&self.projects),
            Arc::clone(&self.workspaces),
            Arc::clone(&self.users),
            Arc::clone(&self.clock),
        )
    }

    fn task_service(
        &self,
    ) -> TaskLifecycleService<
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        InMemoryAssignmentEvents,
        FixedClock,
    > {
        TaskLifecycleService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.events),
            Arc::clone(&self.clock),
        )
    }

    fn comment_service(
        &self,
    ) -> CommentService<
        InMemoryTaskRepository,
        InMemoryProjectRepository,
        InMemoryCommentRepository,
        FixedClock,
    > {
        CommentService::new(
            Arc::clone(&self.tasks),
            Arc::clone(&self.projects),
            Arc::clone(&self.comments),
            Arc::clone(&self.clock),
        )
    }
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn email(raw: &str) -> EmailAddress {
    EmailAddress::new(raw).expect("valid email")
}

fn workspace_id() -> WorkspaceId {
    WorkspaceId::new("org_1").expect("valid workspace id")
}

fn user_created(id: &str, name: &str, address: &str) -> IdentityEvent {
    IdentityEvent::UserCreated {
        id: user_id(id),
        name: name.to_owned(),
        email: email(address),
        image_url: None,
    }
}

async fn provision_workspace(world: &World) {
    let sync = world.identity_sync();
    for event in [
        user_created("user_admin", "Ada", "ada@example.com"),
        user_created("user_lead", "Lea", "lea@example.com"),
        user_created("user_member", "Mia", "mia@example.com"),
        user_created("user_outsider", "Oss", "oss@example.com"),
        IdentityEvent::WorkspaceCreated {
            id: workspace_id(),
            name: "Acme".to_owned(),
            slug: "acme".to_owned(),
            image_url: None,
            created_by: user_id("user_admin"),
        },
    ] {
        sync.apply(event).await.expect("sync should succeed");
    }

    let membership = world.membership();
    for address in ["lea@example.com", "mia@example.com"] {
        membership
            .add_member(AddMemberRequest::new(
                workspace_id(),
                user_id("user_admin"),
                email(address),
                MemberRole::Member,
            ))
            .await
            .expect("member should be added");
    }
}

fn origin() -> Origin {
    Origin::new("https://app.example.com").expect("valid origin")
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn full_flow_from_identity_sync_to_comment() -> eyre::Result<()> {
    let world = World::new();
    provision_workspace(&world).await;

    let project = world
        .project_service()
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch")
                .with_team_lead_email(email("lea@example.com"))
                .with_member_emails(vec![email("lea@example.com"), email("mia@example.com")]),
        )
        .await?;

    let due_date = Utc
        .with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp");
    let task = world
        .task_service()
        .create_task(
            CreateTaskRequest::new(
                project.id(),
                user_id("user_lead"),
                "Ship the launch checklist",
                due_date,
                origin(),
            )
            .with_assignee(user_id("user_member")),
        )
        .await?;
    ensure!(
        world.events.drain().len() == 1,
        "assignment must publish exactly one event"
    );

    let comment = world
        .comment_service()
        .add_comment(task.id(), &user_id("user_member"), "On it.")
        .await?;
    assert_eq!(comment.content(), "On it.");

    let listed = world.comment_service().list_for_task(task.id()).await?;
    assert_eq!(listed.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workspace_member_without_admin_cannot_create_projects() {
    let world = World::new();
    provision_workspace(&world).await;

    let result = world
        .project_service()
        .create_project(CreateProjectRequest::new(
            workspace_id(),
            user_id("user_member"),
            "Rogue project",
        ))
        .await;

    assert!(matches!(
        result,
        Err(ProjectLifecycleError::AdminRequired { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_project_member_cannot_create_tasks() {
    let world = World::new();
    provision_workspace(&world).await;

    let project = world
        .project_service()
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch")
                .with_member_emails(vec![email("lea@example.com")]),
        )
        .await
        .expect("project creation should succeed");

    let due_date = Utc
        .with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp");
    let result = world
        .task_service()
        .create_task(CreateTaskRequest::new(
            project.id(),
            user_id("user_member"),
            "Sneaky task",
            due_date,
            origin(),
        ))
        .await;

    assert!(matches!(
        result,
        Err(TaskLifecycleError::NotProjectMember { .. })
    ));
    assert!(world.events.drain().is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_project_member_cannot_comment() {
    let world = World::new();
    provision_workspace(&world).await;

    let project = world
        .project_service()
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch")
                .with_member_emails(vec![email("lea@example.com")]),
        )
        .await
        .expect("project creation should succeed");

    let due_date = Utc
        .with_ymd_and_hms(2026, 3, 14, 17, 0, 0)
        .single()
        .expect("valid timestamp");
    let task = world
        .task_service()
        .create_task(CreateTaskRequest::new(
            project.id(),
            user_id("user_lead"),
            "Ship the launch checklist",
            due_date,
            origin(),
        ))
        .await
        .expect("task creation should succeed");

    let result = world
        .comment_service()
        .add_comment(task.id(), &user_id("user_outsider"), "Drive-by comment")
        .await;

    assert!(matches!(result, Err(CommentError::NotProjectMember { .. })));
}
