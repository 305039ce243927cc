//! Workspace membership management.

use crate::directory::{
    domain::{EmailAddress, MemberRole, UserId, Workspace, WorkspaceId, WorkspaceMember},
    ports::{DirectoryRepositoryError, UserRepository, WorkspaceRepository},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for adding a member to a workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddMemberRequest {
    workspace_id: WorkspaceId,
    acting_user: UserId,
    invitee_email: EmailAddress,
    role: MemberRole,
    message: Option<String>,
}

impl AddMemberRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub const fn new(
        workspace_id: WorkspaceId,
        acting_user: UserId,
        invitee_email: EmailAddress,
        role: MemberRole,
    ) -> Self {
        Self {
            workspace_id,
            acting_user,
            invitee_email,
            role,
            message: None,
        }
    }

    /// Attaches an invitation message.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }
}

/// Service-level errors for membership operations.
#[derive(Debug, Error)]
pub enum MembershipError {
    /// The workspace does not exist.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// The acting user lacks the ADMIN role in the workspace.
    #[error("user {user} requires admin privileges in workspace {workspace}")]
    AdminRequired {
        /// Acting user identifier.
        user: UserId,
        /// Workspace identifier.
        workspace: WorkspaceId,
    },

    /// No user carries the invitee email address.
    #[error("no user found for email {0}")]
    UserNotFound(EmailAddress),

    /// The invitee already belongs to the workspace.
    #[error("user {user} is already a member of workspace {workspace}")]
    AlreadyMember {
        /// Invitee user identifier.
        user: UserId,
        /// Workspace identifier.
        workspace: WorkspaceId,
    },

    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
}

/// Workspace membership orchestration service.
#[derive(Clone)]
pub struct MembershipService<U, W, C>
where
    U: UserRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    workspaces: Arc<W>,
    clock: Arc<C>,
}

impl<U, W, C> MembershipService<U, W, C>
where
    U: UserRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new membership service.
    #[must_use]
    pub const fn new(users: Arc<U>, workspaces: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            users,
            workspaces,
            clock,
        }
    }

    /// Returns all workspaces the user belongs to.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::Repository`] when the lookup fails.
    pub async fn list_workspaces(&self, user: &UserId) -> Result<Vec<Workspace>, MembershipError> {
        Ok(self.workspaces.list_for_user(user).await?)
    }

    /// Adds a member to a workspace on behalf of an admin.
    ///
    /// # Errors
    ///
    /// Returns [`MembershipError::WorkspaceNotFound`] when the workspace
    /// does not exist, [`MembershipError::AdminRequired`] when the acting
    /// user is not an admin, [`MembershipError::UserNotFound`] when no user
    /// carries the invitee email, and [`MembershipError::AlreadyMember`]
    /// when the invitee already belongs to the workspace.
    pub async fn add_member(
        &self,
        request: AddMemberRequest,
    ) -> Result<WorkspaceMember, MembershipError> {
        let workspace = self
            .workspaces
            .find_by_id(&request.workspace_id)
            .await?
            .ok_or_else(|| MembershipError::WorkspaceNotFound(request.workspace_id.clone()))?;

        let acting_member = self
            .workspaces
            .find_member(workspace.id(), &request.acting_user)
            .await?;
        if !acting_member.is_some_and(|member| member.is_admin()) {
            return Err(MembershipError::AdminRequired {
                user: request.acting_user,
                workspace: request.workspace_id,
            });
        }

        let invitee = self
            .users
            .find_by_email(&request.invitee_email)
            .await?
            .ok_or_else(|| MembershipError::UserNotFound(request.invitee_email.clone()))?;

        let existing = self
            .workspaces
            .find_member(workspace.id(), invitee.id())
            .await?;
        if existing.is_some() {
            return Err(MembershipError::AlreadyMember {
                user: invitee.id().clone(),
                workspace: request.workspace_id,
            });
        }

        let mut member = WorkspaceMember::new(
            request.workspace_id.clone(),
            invitee.id().clone(),
            request.role,
            &*self.clock,
        );
        if let Some(message) = request.message {
            member = member.with_message(message);
        }

        match self.workspaces.add_member(&member).await {
            Ok(()) => {
                info!(
                    user = %member.user_id(),
                    workspace = %member.workspace_id(),
                    role = member.role().as_str(),
                    "member added to workspace"
                );
                Ok(member)
            }
            Err(DirectoryRepositoryError::DuplicateMember { user, workspace }) => {
                Err(MembershipError::AlreadyMember { user, workspace })
            }
            Err(err) => Err(err.into()),
        }
    }
}
