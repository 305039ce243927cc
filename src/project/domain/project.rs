//! Project aggregate root and membership types.

use super::{
    ParseProjectPriorityError, ParseProjectStatusError, ProjectDomainError, ProjectId,
};
use crate::directory::domain::{UserId, WorkspaceId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Project delivery status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Scoping and planning phase.
    Planning,
    /// Work is underway.
    Active,
    /// Work is temporarily paused.
    OnHold,
    /// All work is finished.
    Completed,
}

impl ProjectStatus {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Planning => "planning",
            Self::Active => "active",
            Self::OnHold => "on_hold",
            Self::Completed => "completed",
        }
    }
}

impl TryFrom<&str> for ProjectStatus {
    type Error = ParseProjectStatusError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "planning" => Ok(Self::Planning),
            "active" => Ok(Self::Active),
            "on_hold" => Ok(Self::OnHold),
            "completed" => Ok(Self::Completed),
            _ => Err(ParseProjectStatusError(value.to_owned())),
        }
    }
}

/// Project priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectPriority {
    /// Can wait.
    Low,
    /// Normal scheduling.
    Medium,
    /// Front of the queue.
    High,
}

impl ProjectPriority {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl TryFrom<&str> for ProjectPriority {
    type Error = ParseProjectPriorityError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(ParseProjectPriorityError(value.to_owned())),
        }
    }
}

/// Completion percentage between 0 and 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Progress(u8);

impl Progress {
    /// Creates a validated progress percentage.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::InvalidProgress`] when the value
    /// exceeds 100.
    pub const fn new(value: u8) -> Result<Self, ProjectDomainError> {
        if value > 100 {
            return Err(ProjectDomainError::InvalidProgress(value));
        }
        Ok(Self(value))
    }

    /// Returns the underlying percentage.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Progress {
    fn default() -> Self {
        Self(0)
    }
}

/// Input for creating a new project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDraft {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Optional free-form description.
    pub description: Option<String>,
    /// Delivery status.
    pub status: ProjectStatus,
    /// Priority.
    pub priority: ProjectPriority,
    /// Completion percentage.
    pub progress: Progress,
    /// Optional team lead.
    pub team_lead: Option<UserId>,
    /// Optional planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Optional planned end date.
    pub end_date: Option<DateTime<Utc>>,
}

/// Replacement values for a project update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectUpdate {
    /// New display name.
    pub name: String,
    /// New description.
    pub description: Option<String>,
    /// New delivery status.
    pub status: ProjectStatus,
    /// New priority.
    pub priority: ProjectPriority,
    /// New completion percentage.
    pub progress: Progress,
    /// New planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// New planned end date.
    pub end_date: Option<DateTime<Utc>>,
}

/// Parameter object for reconstructing a persisted project aggregate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedProjectData {
    /// Persisted project identifier.
    pub id: ProjectId,
    /// Persisted owning workspace.
    pub workspace_id: WorkspaceId,
    /// Persisted display name.
    pub name: String,
    /// Persisted description.
    pub description: Option<String>,
    /// Persisted delivery status.
    pub status: ProjectStatus,
    /// Persisted priority.
    pub priority: ProjectPriority,
    /// Persisted completion percentage.
    pub progress: Progress,
    /// Persisted team lead, if any.
    pub team_lead: Option<UserId>,
    /// Persisted planned start date.
    pub start_date: Option<DateTime<Utc>>,
    /// Persisted planned end date.
    pub end_date: Option<DateTime<Utc>>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Project aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    id: ProjectId,
    workspace_id: WorkspaceId,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    priority: ProjectPriority,
    progress: Progress,
    team_lead: Option<UserId>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Project {
    /// Creates a new project from a draft.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the name is
    /// empty after trimming.
    pub fn create(draft: ProjectDraft, clock: &impl Clock) -> Result<Self, ProjectDomainError> {
        let validated_name = validate_name(draft.name)?;
        let timestamp = clock.utc();
        Ok(Self {
            id: ProjectId::new(),
            workspace_id: draft.workspace_id,
            name: validated_name,
            description: draft.description,
            status: draft.status,
            priority: draft.priority,
            progress: draft.progress,
            team_lead: draft.team_lead,
            start_date: draft.start_date,
            end_date: draft.end_date,
            created_at: timestamp,
            updated_at: timestamp,
        })
    }

    /// Reconstructs a project from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedProjectData) -> Self {
        Self {
            id: data.id,
            workspace_id: data.workspace_id,
            name: data.name,
            description: data.description,
            status: data.status,
            priority: data.priority,
            progress: data.progress,
            team_lead: data.team_lead,
            start_date: data.start_date,
            end_date: data.end_date,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Replaces the mutable scalar fields from an update payload.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectDomainError::EmptyProjectName`] when the new name is
    /// empty after trimming.
    pub fn apply_update(
        &mut self,
        update: ProjectUpdate,
        clock: &impl Clock,
    ) -> Result<(), ProjectDomainError> {
        self.name = validate_name(update.name)?;
        self.description = update.description;
        self.status = update.status;
        self.priority = update.priority;
        self.progress = update.progress;
        self.start_date = update.start_date;
        self.end_date = update.end_date;
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn id(&self) -> ProjectId {
        self.id
    }

    /// Returns the owning workspace identifier.
    #[must_use]
    pub const fn workspace_id(&self) -> &WorkspaceId {
        &self.workspace_id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the description, if any.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the delivery status.
    #[must_use]
    pub const fn status(&self) -> ProjectStatus {
        self.status
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> ProjectPriority {
        self.priority
    }

    /// Returns the completion percentage.
    #[must_use]
    pub const fn progress(&self) -> Progress {
        self.progress
    }

    /// Returns the team lead, if any.
    #[must_use]
    pub const fn team_lead(&self) -> Option<&UserId> {
        self.team_lead.as_ref()
    }

    /// Returns the planned start date, if any.
    #[must_use]
    pub const fn start_date(&self) -> Option<DateTime<Utc>> {
        self.start_date
    }

    /// Returns the planned end date, if any.
    #[must_use]
    pub const fn end_date(&self) -> Option<DateTime<Utc>> {
        self.end_date
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

    /// Returns `true` when the given user is the team lead.
    #[must_use]
    pub fn is_led_by(&self, user: &UserId) -> bool {
        self.team_lead.as_ref() == Some(user)
    }
}

fn validate_name(raw: String) -> Result<String, ProjectDomainError> {
    let normalized = raw.trim();
    if normalized.is_empty() {
        return Err(ProjectDomainError::EmptyProjectName);
    }
    Ok(normalized.to_owned())
}

/// Membership of a user in a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    project_id: ProjectId,
    user_id: UserId,
    added_at: DateTime<Utc>,
}

impl ProjectMember {
    /// Creates a new project membership.
    #[must_use]
    pub fn new(project_id: ProjectId, user_id: UserId, clock: &impl Clock) -> Self {
        Self {
            project_id,
            user_id,
            added_at: clock.utc(),
        }
    }

    /// Reconstructs a membership from persisted storage.
    #[must_use]
    pub const fn from_persisted(
        project_id: ProjectId,
        user_id: UserId,
        added_at: DateTime<Utc>,
    ) -> Self {
        Self {
            project_id,
            user_id,
            added_at,
        }
    }

    /// Returns the project identifier.
    #[must_use]
    pub const fn project_id(&self) -> ProjectId {
        self.project_id
    }

    /// Returns the member's user identifier.
    #[must_use]
    pub const fn user_id(&self) -> &UserId {
        &self.user_id
    }

    /// Returns the timestamp the membership was recorded.
    #[must_use]
    pub const fn added_at(&self) -> DateTime<Utc> {
        self.added_at
    }
}
