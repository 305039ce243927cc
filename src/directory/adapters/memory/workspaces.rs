//! In-memory workspace repository for directory tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{UserId, Workspace, WorkspaceId, WorkspaceMember},
    ports::{DirectoryRepositoryError, DirectoryRepositoryResult, WorkspaceRepository},
};

/// Thread-safe in-memory workspace repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryWorkspaceRepository {
    state: Arc<RwLock<InMemoryWorkspaceState>>,
}

#[derive(Debug, Default)]
struct InMemoryWorkspaceState {
    workspaces: HashMap<WorkspaceId, Workspace>,
    members: HashMap<WorkspaceId, Vec<WorkspaceMember>>,
}

impl InMemoryWorkspaceRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> DirectoryRepositoryError {
    DirectoryRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl WorkspaceRepository for InMemoryWorkspaceRepository {
    async fn store(&self, workspace: &Workspace) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.workspaces.contains_key(workspace.id()) {
            return Err(DirectoryRepositoryError::DuplicateWorkspace(
                workspace.id().clone(),
            ));
        }
        state
            .workspaces
            .insert(workspace.id().clone(), workspace.clone());
        Ok(())
    }

    async fn update(&self, workspace: &Workspace) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if !state.workspaces.contains_key(workspace.id()) {
            return Err(DirectoryRepositoryError::WorkspaceNotFound(
                workspace.id().clone(),
            ));
        }
        state
            .workspaces
            .insert(workspace.id().clone(), workspace.clone());
        Ok(())
    }

    async fn remove(&self, id: &WorkspaceId) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        state
            .workspaces
            .remove(id)
            .ok_or_else(|| DirectoryRepositoryError::WorkspaceNotFound(id.clone()))?;
        // Memberships cascade with the workspace.
        state.members.remove(id);
        Ok(())
    }

    async fn find_by_id(
        &self,
        id: &WorkspaceId,
    ) -> DirectoryRepositoryResult<Option<Workspace>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.workspaces.get(id).cloned())
    }

    async fn list_for_user(&self, user: &UserId) -> DirectoryRepositoryResult<Vec<Workspace>> {
        let state = self.state.read().map_err(lock_error)?;
        let workspaces = state
            .members
            .iter()
            .filter(|(_, members)| members.iter().any(|member| member.user_id() == user))
            .filter_map(|(workspace_id, _)| state.workspaces.get(workspace_id))
            .cloned()
            .collect();
        Ok(workspaces)
    }

    async fn add_member(&self, member: &WorkspaceMember) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let members = state
            .members
            .entry(member.workspace_id().clone())
            .or_default();
        if members
            .iter()
            .any(|existing| existing.user_id() == member.user_id())
        {
            return Err(DirectoryRepositoryError::DuplicateMember {
                user: member.user_id().clone(),
                workspace: member.workspace_id().clone(),
            });
        }
        members.push(member.clone());
        Ok(())
    }

    async fn find_member(
        &self,
        workspace: &WorkspaceId,
        user: &UserId,
    ) -> DirectoryRepositoryResult<Option<WorkspaceMember>> {
        let state = self.state.read().map_err(lock_error)?;
        let member = state
            .members
            .get(workspace)
            .and_then(|members| members.iter().find(|member| member.user_id() == user))
            .cloned();
        Ok(member)
    }

    async fn list_members(
        &self,
        workspace: &WorkspaceId,
    ) -> DirectoryRepositoryResult<Vec<WorkspaceMember>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.members.get(workspace).cloned().unwrap_or_default())
    }
}
