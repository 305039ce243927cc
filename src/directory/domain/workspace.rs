//! Workspace aggregate and membership types.

use super::{DirectoryDomainError, ParseMemberRoleError, UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Role a user holds within a workspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    /// Full control: manage members and projects.
    Admin,
    /// Regular participant.
    Member,
}

impl MemberRole {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl TryFrom<&str> for MemberRole {
    type Error = ParseMemberRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            _ => Err(ParseMemberRoleError(value.to_owned())),
        }
    }
}

/// Workspace aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    id: WorkspaceId,
    name: String,
    slug: String,
    image_url: Option<String>,
    owner: UserId,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted workspace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedWorkspaceData {
    /// Persisted workspace identifier.
    pub id: WorkspaceId,
    /// Persisted display name.
    pub name: String,
    /// Persisted URL slug.
    pub slug: String,
    /// Persisted image URL, if any.
    pub image_url: Option<String>,
    /// Persisted owner identifier.
    pub owner: UserId,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Workspace {
    /// Creates a new workspace owned by the given user.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyWorkspaceName`] when the name is
    /// empty after trimming.
    pub fn new(
        id: WorkspaceId,
        name: impl Into<String>,
        slug: impl Into<String>,
        owner: UserId,
        clock: &impl Clock,
    ) -> Result<Self, DirectoryDomainError> {
        let validated_name = validate_name(name.into())?;
        let timestamp = clock.utc();
        Ok(Self {
            id,
            name: validated_name,
            slug: slug.into(),
            image_url: None,
            owner,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Sets the workspace image URL.
    #[must_use]
    pub fn with_image_url(mut self, image_url: impl Into<String>) -> Self {
        self.image_url = Some(image_url.into());
        self
    }

    /// Reconstructs a workspace from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedWorkspaceData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            slug: data.slug,
            image_url: data.image_url,
            owner: data.owner,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces name, slug, and image URL from a provider update.
    ///
    /// # Errors
    ///
    /// Returns [`DirectoryDomainError::EmptyWorkspaceName`] when the new name
    /// is empty after trimming.
    pub fn apply_update(
        &mut self,
        name: impl Into<String>,
        slug: impl Into<String>,
        image_url: Option<String>,
        clock: &impl Clock,
    ) -> Result<(), DirectoryDomainError> {
        self.name = validate_name(name.into())?;
        self.slug = slug.into();
        self.image_url = image_url;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn id(&self) -> &WorkspaceId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the URL slug.
    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Returns the image URL, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Returns the owning user identifier.
    #[must_use]
    pub const fn owner(&self) -> &UserId {
        &self.owner
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

fn validate_name(raw: String) -> Result<String, DirectoryDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(DirectoryDomainError::EmptyWorkspaceName);
    }
    Ok(normalized.to_owned())
}

/// Membership of a user in a workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceMember {
    workspace_id: WorkspaceId,
    user_id: UserId,
    role: MemberRole,
    message: Option<String>,
    added_at: DateTime<Utc>,
}

impl WorkspaceMember {
    /// Creates a new membership record.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
        clock: &impl Clock,
    ) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
            message: None,
            added_at: clock.utc(),
        }
    }

    /// Attaches the invitation message shown to the new member.
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        workspace_id: WorkspaceId,
        user_id: UserId,
        role: MemberRole,
        message: Option<String>,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            workspace_id,
            user_id,
            role,
            message,
            added_at,
        }
    }

    /// Returns the workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the member's role.
    #[must_use]
    pub const fn role(&self) -> MemberRole {
        self.role
    }

    /// Returns the invitation message, if any.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// Returns the timestamp the membership was recorded.
    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }

    /// Returns `true` when the member holds the ADMIN role.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self.role, MemberRole::Admin)
    }
}
