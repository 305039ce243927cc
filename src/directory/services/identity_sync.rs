//! Synchronization of identity-provider events into the directory.
//!
//! The identity provider delivers events at least once, so every handler
//! converges under re-delivery: profile writes are upserts, duplicate
//! workspace creations are skipped, and deletions of already-absent records
//! succeed silently.

use crate::directory::{
    domain::{
        DirectoryDomainError, EmailAddress, MemberRole, UserId, UserProfile, Workspace,
        WorkspaceId, WorkspaceMember,
    },
    ports::{DirectoryRepositoryError, UserRepository, WorkspaceRepository},
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Event delivered by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IdentityEvent {
    /// A user account was created.
    UserCreated {
        /// Provider-issued user identifier.
        id: UserId,
        /// Display name.
        name: String,
        /// Email address.
        email: EmailAddress,
        /// Optional avatar URL.
        image_url: Option<String>,
    },
    /// A user account was updated.
    UserUpdated {
        /// Provider-issued user identifier.
        id: UserId,
        /// Display name.
        name: String,
        /// Email address.
        email: EmailAddress,
        /// Optional avatar URL.
        image_url: Option<String>,
    },
    /// A user account was deleted.
    UserDeleted {
        /// Provider-issued user identifier.
        id: UserId,
    },
    /// An organization was created; it becomes a workspace.
    WorkspaceCreated {
        /// Provider-issued workspace identifier.
        id: WorkspaceId,
        /// Display name.
        name: String,
        /// URL slug.
        slug: String,
        /// Optional image URL.
        image_url: Option<String>,
        /// User who created the organization.
        created_by: UserId,
    },
    /// An organization was renamed or re-branded.
    WorkspaceUpdated {
        /// Provider-issued workspace identifier.
        id: WorkspaceId,
        /// Display name.
        name: String,
        /// URL slug.
        slug: String,
        /// Optional image URL.
        image_url: Option<String>,
    },
    /// An organization was deleted.
    WorkspaceDeleted {
        /// Provider-issued workspace identifier.
        id: WorkspaceId,
    },
    /// A user accepted an invitation into an organization.
    InvitationAccepted {
        /// Workspace the user joined.
        workspace_id: WorkspaceId,
        /// Joining user.
        user_id: UserId,
        /// Role granted by the invitation.
        role: MemberRole,
    },
}

/// Outcome of applying a single identity event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// The event changed directory state.
    Applied,
    /// The event targeted a record that already exists; nothing changed.
    SkippedExisting,
    /// The event targeted a record that no longer exists; nothing changed.
    SkippedMissing,
}

/// Service-level errors for identity synchronization.
#[derive(Debug, Error)]
pub enum IdentitySyncError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] DirectoryDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] DirectoryRepositoryError),
}

/// Applies identity-provider events to the directory.
#[derive(Clone)]
pub struct IdentitySyncService<U, W, C>
where
    U: UserRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    users: Arc<U>,
    workspaces: Arc<W>,
    clock: Arc<C>,
}

impl<U, W, C> IdentitySyncService<U, W, C>
where
    U: UserRepository,
    W: WorkspaceRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new identity synchronization service.
    #[must_use]
    pub const fn new(users: Arc<U>, workspaces: Arc<W>, clock: Arc<C>) -> Self {
        Self {
            users,
            workspaces,
            clock,
        }
    }

    /// Applies one identity event.
    ///
    /// # Errors
    ///
    /// Returns [`IdentitySyncError`] when validation fails or the
    /// repositories reject persistence.
    pub async fn apply(&self, event: IdentityEvent) -> Result<SyncOutcome, IdentitySyncError> {
        match event {
            IdentityEvent::UserCreated {
                id,
                name,
                email,
                image_url,
            }
            | IdentityEvent::UserUpdated {
                id,
                name,
                email,
                image_url,
            } => self.upsert_user(id, name, email, image_url).await,
            IdentityEvent::UserDeleted { id } => self.remove_user(id).await,
            IdentityEvent::WorkspaceCreated {
                id,
                name,
                slug,
                image_url,
                created_by,
            } => {
                self.create_workspace(id, name, slug, image_url, created_by)
                    .await
            }
            IdentityEvent::WorkspaceUpdated {
                id,
                name,
                slug,
                image_url,
            } => self.update_workspace(id, name, slug, image_url).await,
            IdentityEvent::WorkspaceDeleted { id } => self.remove_workspace(id).await,
            IdentityEvent::InvitationAccepted {
                workspace_id,
                user_id,
                role,
            } => self.accept_invitation(workspace_id, user_id, role).await,
        }
    }

    async fn upsert_user(
        &self,
        id: UserId,
        name: String,
        email: EmailAddress,
        image_url: Option<String>,
    ) -> Result<SyncOutcome, IdentitySyncError> {
        let mut profile = UserProfile::new(id, name, email)?;
        if let Some(url) = image_url {
            profile = profile.with_image_url(url);
        }
        self.users.upsert(&profile).await?;
        Ok(SyncOutcome::Applied)
    }

    async fn remove_user(&self, id: UserId) -> Result<SyncOutcome, IdentitySyncError> {
        match self.users.remove(&id).await {
            Ok(()) => Ok(SyncOutcome::Applied),
            Err(DirectoryRepositoryError::UserNotFound(user_id)) => {
                warn!(user = %user_id, "delete event for unknown user, skipping");
                Ok(SyncOutcome::SkippedMissing)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn create_workspace(
        &self,
        id: WorkspaceId,
        name: String,
        slug: String,
        image_url: Option<String>,
        created_by: UserId,
    ) -> Result<SyncOutcome, IdentitySyncError> {
        // The creating user's own sync event may not have arrived yet.
        if self.users.find_by_id(&created_by).await?.is_none() {
            self.users
                .upsert(&UserProfile::provisional(created_by.clone()))
                .await?;
        }

        if self.workspaces.find_by_id(&id).await?.is_some() {
            info!(workspace = %id, "workspace already synced, skipping");
            return Ok(SyncOutcome::SkippedExisting);
        }

        let mut workspace = Workspace::new(
            id.clone(),
            name,
            slug,
            created_by.clone(),
            &*self.clock,
        )?;
        if let Some(url) = image_url {
            workspace = workspace.with_image_url(url);
        }
        self.workspaces.store(&workspace).await?;

        let owner_membership = WorkspaceMember::new(
            id.clone(),
            created_by,
            MemberRole::Admin,
            &*self.clock,
        );
        self.workspaces.add_member(&owner_membership).await?;

        info!(workspace = %id, "workspace synced with admin owner");
        Ok(SyncOutcome::Applied)
    }

    async fn update_workspace(
        &self,
        id: WorkspaceId,
        name: String,
        slug: String,
        image_url: Option<String>,
    ) -> Result<SyncOutcome, IdentitySyncError> {
        let Some(mut workspace) = self.workspaces.find_by_id(&id).await? else {
            warn!(workspace = %id, "update event for unknown workspace, skipping");
            return Ok(SyncOutcome::SkippedMissing);
        };
        workspace.apply_update(name, slug, image_url, &*self.clock)?;
        self.workspaces.update(&workspace).await?;
        Ok(SyncOutcome::Applied)
    }

    async fn remove_workspace(&self, id: WorkspaceId) -> Result<SyncOutcome, IdentitySyncError> {
        match self.workspaces.remove(&id).await {
            Ok(()) => Ok(SyncOutcome::Applied),
            Err(DirectoryRepositoryError::WorkspaceNotFound(workspace_id)) => {
                warn!(workspace = %workspace_id, "delete event for unknown workspace, skipping");
                Ok(SyncOutcome::SkippedMissing)
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn accept_invitation(
        &self,
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
    ) -> Result<SyncOutcome, IdentitySyncError> {
        let member = WorkspaceMember::new(workspace_id, user_id, role, &*self.clock);
        match self.workspaces.add_member(&member).await {
            Ok(()) => Ok(SyncOutcome::Applied),
            Err(DirectoryRepositoryError::DuplicateMember { user, workspace }) => {
                info!(user = %user, workspace = %workspace, "membership already synced, skipping");
                Ok(SyncOutcome::SkippedExisting)
            }
            Err(err) => Err(err.into()),
        }
    }
}
