//! Domain-focused tests for directory value types.

use crate::directory::domain::{
    DirectoryDomainError, EmailAddress, MemberRole, UserId, UserProfile, Workspace, WorkspaceId,
};
use mockable::DefaultClock;
use rstest::rstest;

#[rstest]
fn user_id_trims_and_accepts_provider_values() {
    let id = UserId::new("  user_2abc  ").expect("valid user id");
    assert_eq!(id.as_str(), "user_2abc");
}

#[rstest]
fn user_id_rejects_empty_value() {
    assert_eq!(UserId::new("   "), Err(DirectoryDomainError::EmptyUserId));
}

#[rstest]
#[case("alice@example.com")]
#[case("a.b+tag@sub.example.org")]
fn email_accepts_structurally_valid_addresses(#[case] raw: &str) {
    let email = EmailAddress::new(raw).expect("valid email");
    assert_eq!(email.as_str(), raw);
}

#[rstest]
#[case("")]
#[case("no-at-sign")]
#[case("two@@example.com")]
#[case("spaced @example.com")]
#[case("dotless@example")]
fn email_rejects_malformed_addresses(#[case] raw: &str) {
    assert!(matches!(
        EmailAddress::new(raw),
        Err(DirectoryDomainError::InvalidEmail(_))
    ));
}

#[rstest]
#[case("admin", MemberRole::Admin)]
#[case("ADMIN", MemberRole::Admin)]
#[case(" Member ", MemberRole::Member)]
fn member_role_parses_case_insensitively(#[case] raw: &str, #[case] expected: MemberRole) {
    assert_eq!(MemberRole::try_from(raw), Ok(expected));
}

#[rstest]
fn member_role_rejects_unknown_values() {
    assert!(MemberRole::try_from("owner").is_err());
}

#[rstest]
fn provisional_profile_has_valid_email_for_awkward_ids() {
    let id = UserId::new("user 2@abc").expect("valid user id");
    let profile = UserProfile::provisional(id);
    assert_eq!(profile.name(), "Pending User");
    assert!(profile.email().as_str().ends_with("@sync.invalid"));
}

#[rstest]
fn workspace_rejects_empty_name() {
    let id = WorkspaceId::new("org_1").expect("valid workspace id");
    let owner = UserId::new("user_1").expect("valid user id");
    let result = Workspace::new(id, "   ", "slug", owner, &DefaultClock);
    assert_eq!(result, Err(DirectoryDomainError::EmptyWorkspaceName));
}

#[rstest]
fn workspace_update_replaces_branding() {
    let id = WorkspaceId::new("org_1").expect("valid workspace id");
    let owner = UserId::new("user_1").expect("valid user id");
    let mut workspace = Workspace::new(id, "Acme", "acme", owner, &DefaultClock)
        .expect("valid workspace")
        .with_image_url("https://img.example.com/a.png");

    workspace
        .apply_update("Acme Corp", "acme-corp", None, &DefaultClock)
        .expect("valid update");

    assert_eq!(workspace.name(), "Acme Corp");
    assert_eq!(workspace.slug(), "acme-corp");
    assert_eq!(workspace.image_url(), None);
}
