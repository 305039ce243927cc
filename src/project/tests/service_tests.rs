//! Service orchestration tests for project lifecycle permissions.

use std::sync::Arc;

use crate::directory::{
    adapters::memory::{InMemoryUserRepository, InMemoryWorkspaceRepository},
    domain::{EmailAddress, MemberRole, UserId, UserProfile, Workspace, WorkspaceId, WorkspaceMember},
    ports::{UserRepository, WorkspaceRepository},
};
use crate::project::{
    adapters::memory::InMemoryProjectRepository,
    domain::{Progress, ProjectPriority, ProjectStatus, ProjectUpdate},
    ports::ProjectRepository,
    services::{
        CreateProjectRequest, ProjectLifecycleError, ProjectLifecycleService, UpdateProjectRequest,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = ProjectLifecycleService<
    InMemoryProjectRepository,
    InMemoryWorkspaceRepository,
    InMemoryUserRepository,
    DefaultClock,
>;

struct Harness {
    service: TestService,
    users: Arc<InMemoryUserRepository>,
    workspaces: Arc<InMemoryWorkspaceRepository>,
    projects: Arc<InMemoryProjectRepository>,
}

#[fixture]
fn harness() -> Harness {
    let projects = Arc::new(InMemoryProjectRepository::new());
    let workspaces = Arc::new(InMemoryWorkspaceRepository::new());
    let users = Arc::new(InMemoryUserRepository::new());
    let service = ProjectLifecycleService::new(
        Arc::clone(&projects),
        Arc::clone(&workspaces),
        Arc::clone(&users),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        users,
        workspaces,
        projects,
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

async fn seed_workspace(harness: &Harness) {
    let workspace = Workspace::new(
        workspace_id(),
        "Acme",
        "acme",
        user_id("user_admin"),
        &DefaultClock,
    )
    .expect("valid workspace");
    harness
        .workspaces
        .store(&workspace)
        .await
        .expect("store should succeed");
    harness
        .workspaces
        .add_member(&WorkspaceMember::new(
            workspace_id(),
            user_id("user_admin"),
            MemberRole::Admin,
            &DefaultClock,
        ))
        .await
        .expect("admin membership should store");
}

async fn seed_member(harness: &Harness, id: &str, address: &str) {
    let profile =
        UserProfile::new(user_id(id), "Member", email(address)).expect("valid profile");
    harness
        .users
        .upsert(&profile)
        .await
        .expect("upsert should succeed");
    harness
        .workspaces
        .add_member(&WorkspaceMember::new(
            workspace_id(),
            user_id(id),
            MemberRole::Member,
            &DefaultClock,
        ))
        .await
        .expect("membership should store");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn admin_creates_project_with_lead_and_members(harness: Harness) {
    seed_workspace(&harness).await;
    seed_member(&harness, "user_lead", "lead@example.com").await;
    seed_member(&harness, "user_2", "bob@example.com").await;

    let project = harness
        .service
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch plan")
                .with_team_lead_email(email("lead@example.com"))
                .with_member_emails(vec![email("bob@example.com")]),
        )
        .await
        .expect("creation should succeed");

    assert_eq!(project.team_lead(), Some(&user_id("user_lead")));
    let members = harness
        .projects
        .list_members(project.id())
        .await
        .expect("listing should succeed");
    assert_eq!(members.len(), 1);
    assert!(
        harness
            .projects
            .is_member(project.id(), &user_id("user_2"))
            .await
            .expect("membership check should succeed")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn unknown_lead_email_resolves_to_no_lead(harness: Harness) {
    seed_workspace(&harness).await;

    let project = harness
        .service
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch plan")
                .with_team_lead_email(email("ghost@example.com")),
        )
        .await
        .expect("creation should succeed");

    assert_eq!(project.team_lead(), None);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_workspace_members_are_not_added_to_project(harness: Harness) {
    seed_workspace(&harness).await;
    // user_outsider has a profile but no workspace membership.
    let outsider = UserProfile::new(
        user_id("user_outsider"),
        "Outsider",
        email("outsider@example.com"),
    )
    .expect("valid profile");
    harness
        .users
        .upsert(&outsider)
        .await
        .expect("upsert should succeed");

    let project = harness
        .service
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch plan")
                .with_member_emails(vec![email("outsider@example.com")]),
        )
        .await
        .expect("creation should succeed");

    let members = harness
        .projects
        .list_members(project.id())
        .await
        .expect("listing should succeed");
    assert!(members.is_empty());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn non_admin_cannot_create_project(harness: Harness) {
    seed_workspace(&harness).await;
    seed_member(&harness, "user_2", "bob@example.com").await;

    let result = harness
        .service
        .create_project(CreateProjectRequest::new(
            workspace_id(),
            user_id("user_2"),
            "Launch plan",
        ))
        .await;

    assert!(matches!(
        result,
        Err(ProjectLifecycleError::AdminRequired { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn team_lead_updates_project_without_admin_role(harness: Harness) {
    seed_workspace(&harness).await;
    seed_member(&harness, "user_lead", "lead@example.com").await;

    let project = harness
        .service
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch plan")
                .with_team_lead_email(email("lead@example.com")),
        )
        .await
        .expect("creation should succeed");

    let updated = harness
        .service
        .update_project(UpdateProjectRequest {
            project_id: project.id(),
            acting_user: user_id("user_lead"),
            update: ProjectUpdate {
                name: "Launch plan".to_owned(),
                description: None,
                status: ProjectStatus::Active,
                priority: ProjectPriority::High,
                progress: Progress::new(10).expect("valid progress"),
                start_date: None,
                end_date: None,
            },
        })
        .await
        .expect("lead update should succeed");

    assert_eq!(updated.status(), ProjectStatus::Active);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn regular_member_cannot_update_project(harness: Harness) {
    seed_workspace(&harness).await;
    seed_member(&harness, "user_2", "bob@example.com").await;

    let project = harness
        .service
        .create_project(CreateProjectRequest::new(
            workspace_id(),
            user_id("user_admin"),
            "Launch plan",
        ))
        .await
        .expect("creation should succeed");

    let result = harness
        .service
        .update_project(UpdateProjectRequest {
            project_id: project.id(),
            acting_user: user_id("user_2"),
            update: ProjectUpdate {
                name: "Hijacked".to_owned(),
                description: None,
                status: ProjectStatus::Active,
                priority: ProjectPriority::Low,
                progress: Progress::default(),
                start_date: None,
                end_date: None,
            },
        })
        .await;

    assert!(matches!(
        result,
        Err(ProjectLifecycleError::PermissionDenied { .. })
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn only_lead_adds_project_members(harness: Harness) {
    seed_workspace(&harness).await;
    seed_member(&harness, "user_lead", "lead@example.com").await;
    seed_member(&harness, "user_2", "bob@example.com").await;

    let project = harness
        .service
        .create_project(
            CreateProjectRequest::new(workspace_id(), user_id("user_admin"), "Launch plan")
                .with_team_lead_email(email("lead@example.com")),
        )
        .await
        .expect("creation should succeed");

    let denied = harness
        .service
        .add_member(project.id(), &user_id("user_admin"), &email("bob@example.com"))
        .await;
    assert!(matches!(
        denied,
        Err(ProjectLifecycleError::LeadRequired { .. })
    ));

    let member = harness
        .service
        .add_member(project.id(), &user_id("user_lead"), &email("bob@example.com"))
        .await
        .expect("lead add should succeed");
    assert_eq!(member.user_id(), &user_id("user_2"));

    let duplicate = harness
        .service
        .add_member(project.id(), &user_id("user_lead"), &email("bob@example.com"))
        .await;
    assert!(matches!(
        duplicate,
        Err(ProjectLifecycleError::AlreadyMember { .. })
    ));
}
