//! Domain model for the workspace and user directory.
//!
//! Users and workspaces carry identifiers issued by the external identity
//! provider, so their ids are validated strings rather than locally
//! generated UUIDs. All infrastructure concerns stay outside the domain
//! boundary.

mod error;
mod ids;
mod user;
mod workspace;

pub use error::{DirectoryDomainError, ParseMemberRoleError};
pub use ids::{EmailAddress, UserId, WorkspaceId};
pub use user::UserProfile;
pub use workspace::{MemberRole, PersistedWorkspaceData, Workspace, WorkspaceMember};
