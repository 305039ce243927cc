//! Service layer for project creation, update, and membership.

use crate::directory::{
    domain::{EmailAddress, UserId, WorkspaceId},
    ports::{DirectoryRepositoryError, UserRepository, WorkspaceRepository},
};
use crate::project::{
    domain::{
        Progress, Project, ProjectDomainError, ProjectDraft, ProjectId, ProjectMember,
        ProjectPriority, ProjectStatus, ProjectUpdate,
    },
    ports::{ProjectRepository, ProjectRepositoryError},
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::info;

/// Request payload for creating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateProjectRequest {
    workspace_id: WorkspaceId,
    acting_user: UserId,
    name: String,
    description: Option<String>,
    status: ProjectStatus,
    priority: ProjectPriority,
    progress: Progress,
    team_lead_email: Option<EmailAddress>,
    member_emails: Vec<EmailAddress>,
    start_date: Option<DateTime<Utc>>,
    end_date: Option<DateTime<Utc>>,
}

impl CreateProjectRequest {
    /// Creates a request with required fields.
    #[must_use]
    pub fn new(
        workspace_id: WorkspaceId,
        acting_user: UserId,
        name: impl Into<String>,
    ) -> Self {
        Self {
            workspace_id,
            acting_user,
            name: name.into(),
            description: None,
            status: ProjectStatus::Planning,
            priority: ProjectPriority::Medium,
            progress: Progress::default(),
            team_lead_email: None,
            member_emails: Vec::new(),
            start_date: None,
            end_date: None,
        }
    }

    /// Sets the project description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the delivery status.
    #[must_use]
    pub const fn with_status(mut self, status: ProjectStatus) -> Self {
        self.status = status;
        self
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: ProjectPriority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the completion percentage.
    #[must_use]
    pub const fn with_progress(mut self, progress: Progress) -> Self {
        self.progress = progress;
        self
    }

    /// Sets the team lead by email.
    #[must_use]
    pub fn with_team_lead_email(mut self, email: EmailAddress) -> Self {
        self.team_lead_email = Some(email);
        self
    }

    /// Sets the initial member emails.
    #[must_use]
    pub fn with_member_emails(mut self, emails: impl IntoIterator<Item = EmailAddress>) -> Self {
        self.member_emails = emails.into_iter().collect();
        self
    }

    /// Sets the planned schedule.
    #[must_use]
    pub const fn with_schedule(
        mut self,
        start_date: Option<DateTime<Utc>>,
        end_date: Option<DateTime<Utc>>,
    ) -> Self {
        self.start_date = start_date;
        self.end_date = end_date;
        self
    }
}

/// Request payload for updating a project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateProjectRequest {
    /// Project to update.
    pub project_id: ProjectId,
    /// User performing the update.
    pub acting_user: UserId,
    /// Replacement field values.
    pub update: ProjectUpdate,
}

/// Service-level errors for project lifecycle operations.
#[derive(Debug, Error)]
pub enum ProjectLifecycleError {
    /// The workspace does not exist.
    #[error("workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// The project does not exist.
    #[error("project not found: {0}")]
    ProjectNotFound(ProjectId),

    /// The acting user may not create projects in the workspace.
    #[error("user {user} requires admin privileges in workspace {workspace}")]
    AdminRequired {
        /// Acting user identifier.
        user: UserId,
        /// Workspace identifier.
        workspace: WorkspaceId,
    },

    /// The acting user may not modify the project.
    #[error("user {user} may not modify project {project}")]
    PermissionDenied {
        /// Acting user identifier.
        user: UserId,
        /// Project identifier.
        project: ProjectId,
    },

    /// Only the team lead may add project members.
    #[error("user {user} is not the team lead of project {project}")]
    LeadRequired {
        /// Acting user identifier.
        user: UserId,
        /// Project identifier.
        project: ProjectId,
    },

    /// No user carries the given email address.
    #[error("no user found for email {0}")]
    UserNotFound(EmailAddress),

    /// The user is already a member of the project.
    #[error("user {user} is already a member of project {project}")]
    AlreadyMember {
        /// Member user identifier.
        user: UserId,
        /// Project identifier.
        project: ProjectId,
    },

    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] ProjectDomainError),

    /// Project repository operation failed.
    #[error(transparent)]
    Repository(#[from] ProjectRepositoryError),

    /// Directory repository operation failed.
    #[error(transparent)]
    Directory(#[from] DirectoryRepositoryError),
}

/// Result type for project lifecycle service operations.
pub type ProjectLifecycleResult<T> = Result<T, ProjectLifecycleError>;

/// Project lifecycle orchestration service.
#[derive(Clone)]
pub struct ProjectLifecycleService<P, W, U, C>
where
    P: ProjectRepository,
    W: WorkspaceRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    projects: Arc<P>,
    workspaces: Arc<W>,
    users: Arc<U>,
    clock: Arc<C>,
}

impl<P, W, U, C> ProjectLifecycleService<P, W, U, C>
where
    P: ProjectRepository,
    W: WorkspaceRepository,
    U: UserRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new project lifecycle service.
    #[must_use]
    pub const fn new(projects: Arc<P>, workspaces: Arc<W>, users: Arc<U>, clock: Arc<C>) -> Self {
        Self {
            projects,
            workspaces,
            users,
            clock,
        }
    }

    /// Creates a project in a workspace on behalf of an admin.
    ///
    /// The team lead is resolved by email; an unknown lead email resolves to
    /// no lead. Initial members are the subset of the requested emails that
    /// belong to the workspace; the rest are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::WorkspaceNotFound`] when the
    /// workspace does not exist and [`ProjectLifecycleError::AdminRequired`]
    /// when the acting user is not a workspace admin.
    pub async fn create_project(
        &self,
        request: CreateProjectRequest,
    ) -> ProjectLifecycleResult<Project> {
        self.ensure_workspace_admin(&request.workspace_id, &request.acting_user)
            .await?;

        let team_lead = match request.team_lead_email {
            Some(email) => self
                .users
                .find_by_email(&email)
                .await?
                .map(|profile| profile.id().clone()),
            None => None,
        };

        let draft = ProjectDraft {
            workspace_id: request.workspace_id.clone(),
            name: request.name,
            description: request.description,
            status: request.status,
            priority: request.priority,
            progress: request.progress,
            team_lead,
            start_date: request.start_date,
            end_date: request.end_date,
        };
        let project = Project::create(draft, &*self.clock)?;
        self.projects.store(&project).await?;

        self.add_initial_members(&project, request.member_emails)
            .await?;

        info!(
            project = %project.id(),
            workspace = %request.workspace_id,
            "project created"
        );
        Ok(project)
    }

    /// Updates a project's scalar fields.
    ///
    /// Permitted for workspace admins and the project's team lead.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::ProjectNotFound`] when the project
    /// does not exist and [`ProjectLifecycleError::PermissionDenied`] when
    /// the acting user is neither an admin nor the team lead.
    pub async fn update_project(
        &self,
        request: UpdateProjectRequest,
    ) -> ProjectLifecycleResult<Project> {
        let mut project = self
            .projects
            .find_by_id(request.project_id)
            .await?
            .ok_or(ProjectLifecycleError::ProjectNotFound(request.project_id))?;

        let is_admin = self
            .workspaces
            .find_member(project.workspace_id(), &request.acting_user)
            .await?
            .is_some_and(|member| member.is_admin());
        if !is_admin && !project.is_led_by(&request.acting_user) {
            return Err(ProjectLifecycleError::PermissionDenied {
                user: request.acting_user,
                project: request.project_id,
            });
        }

        project.apply_update(request.update, &*self.clock)?;
        self.projects.update(&project).await?;
        Ok(project)
    }

    /// Adds a member to a project on behalf of the team lead.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::LeadRequired`] when the acting user
    /// is not the team lead, [`ProjectLifecycleError::UserNotFound`] when no
    /// user carries the email, and [`ProjectLifecycleError::AlreadyMember`]
    /// for duplicate memberships.
    pub async fn add_member(
        &self,
        project_id: ProjectId,
        acting_user: &UserId,
        invitee_email: &EmailAddress,
    ) -> ProjectLifecycleResult<ProjectMember> {
        let project = self
            .projects
            .find_by_id(project_id)
            .await?
            .ok_or(ProjectLifecycleError::ProjectNotFound(project_id))?;

        if !project.is_led_by(acting_user) {
            return Err(ProjectLifecycleError::LeadRequired {
                user: acting_user.clone(),
                project: project_id,
            });
        }

        let invitee = self
            .users
            .find_by_email(invitee_email)
            .await?
            .ok_or_else(|| ProjectLifecycleError::UserNotFound(invitee_email.clone()))?;

        if self.projects.is_member(project_id, invitee.id()).await? {
            return Err(ProjectLifecycleError::AlreadyMember {
                user: invitee.id().clone(),
                project: project_id,
            });
        }

        let member = ProjectMember::new(project_id, invitee.id().clone(), &*self.clock);
        match self.projects.add_member(&member).await {
            Ok(()) => Ok(member),
            Err(ProjectRepositoryError::DuplicateMember { user, project }) => {
                Err(ProjectLifecycleError::AlreadyMember { user, project })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Returns all projects of a workspace.
    ///
    /// # Errors
    ///
    /// Returns [`ProjectLifecycleError::Repository`] when the lookup fails.
    pub async fn list_for_workspace(
        &self,
        workspace: &WorkspaceId,
    ) -> ProjectLifecycleResult<Vec<Project>> {
        Ok(self.projects.list_for_workspace(workspace).await?)
    }

    async fn ensure_workspace_admin(
        &self,
        workspace_id: &WorkspaceId,
        user: &UserId,
    ) -> ProjectLifecycleResult<()> {
        let workspace = self
            .workspaces
            .find_by_id(workspace_id)
            .await?
            .ok_or_else(|| ProjectLifecycleError::WorkspaceNotFound(workspace_id.clone()))?;

        let membership = self
            .workspaces
            .find_member(workspace.id(), user)
            .await?;
        if !membership.is_some_and(|member| member.is_admin()) {
            return Err(ProjectLifecycleError::AdminRequired {
                user: user.clone(),
                workspace: workspace_id.clone(),
            });
        }
        Ok(())
    }

    async fn add_initial_members(
        &self,
        project: &Project,
        member_emails: Vec<EmailAddress>,
    ) -> ProjectLifecycleResult<()> {
        for email in member_emails {
            let Some(profile) = self.users.find_by_email(&email).await? else {
                continue;
            };
            let in_workspace = self
                .workspaces
                .find_member(project.workspace_id(), profile.id())
                .await?
                .is_some();
            if !in_workspace {
                continue;
            }
            let member = ProjectMember::new(project.id(), profile.id().clone(), &*self.clock);
            match self.projects.add_member(&member).await {
                // The lead may also appear in the member list.
                Ok(()) | Err(ProjectRepositoryError::DuplicateMember { .. }) => {}
                Err(err) => return Err(err.into()),
            }
        }
        Ok(())
    }
}
