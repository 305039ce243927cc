//! Behavioral tests for identity-provider synchronization.

use std::sync::Arc;

use crate::directory::{
    adapters::memory::{InMemoryUserRepository, InMemoryWorkspaceRepository},
    domain::{EmailAddress, MemberRole, UserId, WorkspaceId},
    ports::{UserRepository, WorkspaceRepository},
    services::{IdentityEvent, IdentitySyncService, SyncOutcome},
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService =
    IdentitySyncService<InMemoryUserRepository, InMemoryWorkspaceRepository, DefaultClock>;

struct Harness {
    service: TestService,
    users: Arc<InMemoryUserRepository>,
    workspaces: Arc<InMemoryWorkspaceRepository>,
}

#[fixture]
fn harness() -> Harness {
    let users = Arc::new(InMemoryUserRepository::new());
    let workspaces = Arc::new(InMemoryWorkspaceRepository::new());
    let service = IdentitySyncService::new(
        Arc::clone(&users),
        Arc::clone(&workspaces),
        Arc::new(DefaultClock),
    );
    Harness {
        service,
        users,
        workspaces,
    }
}

fn user_id(raw: &str) -> UserId {
    UserId::new(raw).expect("valid user id")
}

fn workspace_id(raw: &str) -> WorkspaceId {
    WorkspaceId::new(raw).expect("valid workspace id")
}

fn workspace_created(id: &str, created_by: &str) -> IdentityEvent {
    IdentityEvent::WorkspaceCreated {
        id: workspace_id(id),
        name: "Acme".to_owned(),
        slug: "acme".to_owned(),
        image_url: None,
        created_by: user_id(created_by),
    }
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn workspace_creation_provisions_owner_and_admin_membership(harness: Harness) {
    let outcome = harness
        .service
        .apply(workspace_created("org_1", "user_1"))
        .await
        .expect("sync should succeed");
    assert_eq!(outcome, SyncOutcome::Applied);

    let owner = harness
        .users
        .find_by_id(&user_id("user_1"))
        .await
        .expect("lookup should succeed")
        .expect("provisional owner profile exists");
    assert_eq!(owner.name(), "Pending User");

    let member = harness
        .workspaces
        .find_member(&workspace_id("org_1"), &user_id("user_1"))
        .await
        .expect("lookup should succeed")
        .expect("owner membership exists");
    assert_eq!(member.role(), MemberRole::Admin);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn redelivered_workspace_creation_is_skipped(harness: Harness) {
    harness
        .service
        .apply(workspace_created("org_1", "user_1"))
        .await
        .expect("first delivery should succeed");

    let outcome = harness
        .service
        .apply(workspace_created("org_1", "user_1"))
        .await
        .expect("second delivery should succeed");
    assert_eq!(outcome, SyncOutcome::SkippedExisting);

    let members = harness
        .workspaces
        .list_members(&workspace_id("org_1"))
        .await
        .expect("lookup should succeed");
    assert_eq!(members.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn user_update_replaces_profile_and_email_lookup(harness: Harness) {
    harness
        .service
        .apply(IdentityEvent::UserCreated {
            id: user_id("user_1"),
            name: "Alice".to_owned(),
            email: EmailAddress::new("alice@example.com").expect("valid email"),
            image_url: None,
        })
        .await
        .expect("creation should succeed");

    harness
        .service
        .apply(IdentityEvent::UserUpdated {
            id: user_id("user_1"),
            name: "Alice Baker".to_owned(),
            email: EmailAddress::new("alice.baker@example.com").expect("valid email"),
            image_url: None,
        })
        .await
        .expect("update should succeed");

    let stale = harness
        .users
        .find_by_email(&EmailAddress::new("alice@example.com").expect("valid email"))
        .await
        .expect("lookup should succeed");
    assert!(stale.is_none());

    let fresh = harness
        .users
        .find_by_email(&EmailAddress::new("alice.baker@example.com").expect("valid email"))
        .await
        .expect("lookup should succeed")
        .expect("updated profile exists");
    assert_eq!(fresh.name(), "Alice Baker");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_unknown_user_is_skipped_silently(harness: Harness) {
    let outcome = harness
        .service
        .apply(IdentityEvent::UserDeleted {
            id: user_id("user_missing"),
        })
        .await
        .expect("delete should not error");
    assert_eq!(outcome, SyncOutcome::SkippedMissing);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn redelivered_invitation_is_skipped(harness: Harness) {
    harness
        .service
        .apply(workspace_created("org_1", "user_1"))
        .await
        .expect("workspace sync should succeed");

    let invitation = IdentityEvent::InvitationAccepted {
        workspace_id: workspace_id("org_1"),
        user_id: user_id("user_2"),
        role: MemberRole::Member,
    };
    let first = harness
        .service
        .apply(invitation.clone())
        .await
        .expect("first invitation should succeed");
    assert_eq!(first, SyncOutcome::Applied);

    let second = harness
        .service
        .apply(invitation)
        .await
        .expect("second invitation should not error");
    assert_eq!(second, SyncOutcome::SkippedExisting);
}
