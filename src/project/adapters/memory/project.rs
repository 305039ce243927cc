//! In-memory repository for project lifecycle tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::domain::{UserId, WorkspaceId};
use crate::project::{
    domain::{Project, ProjectId, ProjectMember},
    ports::{ProjectRepository, ProjectRepositoryError, ProjectRepositoryResult},
};

/// Thread-safe in-memory project repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProjectRepository {
    state: Arc<RwLock<InMemoryProjectState>>,
}

#[derive(Debug, Default)]
struct InMemoryProjectState {
    projects: HashMap<ProjectId, Project>,
    workspace_index: HashMap<WorkspaceId, Vec<ProjectId>>,
    members: HashMap<ProjectId, Vec<ProjectMember>>,
}

impl InMemoryProjectRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> ProjectRepositoryError {
    ProjectRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl ProjectRepository for InMemoryProjectRepository {
    async fn store(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::DuplicateProject(project.id()));
        }
        state
            .workspace_index
            .entry(project.workspace_id().clone())
            .or_default()
            .push(project.id());
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn update(&self, project: &Project) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.projects.contains_key(&project.id()) {
            return Err(ProjectRepositoryError::NotFound(project.id()));
        }
        state.projects.insert(project.id(), project.clone());
        Ok(())
    }

    async fn find_by_id(&self, id: ProjectId) -> ProjectRepositoryResult<Option<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.projects.get(&id).cloned())
    }

    async fn list_for_workspace(
        &self,
        workspace: &WorkspaceId,
    ) -> ProjectRepositoryResult<Vec<Project>> {
        let state = self.state.read().map_err(lock_error)?;
        let projects = state
            .workspace_index
            .get(workspace)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.projects.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(projects)
    }

    async fn add_member(&self, member: &ProjectMember) -> ProjectRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let members = state.members.entry(member.project_id()).or_default();
        if members
            .iter()
            .any(|existing| existing.user_id() == member.user_id())
        {
            return Err(ProjectRepositoryError::DuplicateMember {
                user: member.user_id().clone(),
                project: member.project_id(),
            });
        }
        members.push(member.clone());
        Ok(())
    }

    async fn list_members(
        &self,
        project: ProjectId,
    ) -> ProjectRepositoryResult<Vec<ProjectMember>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.members.get(&project).cloned().unwrap_or_default())
    }

    async fn is_member(
        &self,
        project: ProjectId,
        user: &UserId,
    ) -> ProjectRepositoryResult<bool> {
        let state = self.state.read().map_err(lock_error)?;
        let is_member = state
            .members
            .get(&project)
            .is_some_and(|members| members.iter().any(|member| member.user_id() == user));
        Ok(is_member)
    }
}
