//! In-memory user repository for directory tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::directory::{
    domain::{EmailAddress, UserId, UserProfile},
    ports::{DirectoryRepositoryError, DirectoryRepositoryResult, UserRepository},
};

/// Thread-safe in-memory user repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    state: Arc<RwLock<InMemoryUserState>>,
}

#[derive(Debug, Default)]
struct InMemoryUserState {
    users: HashMap<UserId, UserProfile>,
    email_index: HashMap<EmailAddress, UserId>,
}

impl InMemoryUserRepository {
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
impl UserRepository for InMemoryUserRepository {
    async fn upsert(&self, profile: &UserProfile) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if let Some(previous) = state.users.get(profile.id()) {
            let stale_email = previous.email().clone();
            state.email_index.remove(&stale_email);
        }
        state
            .email_index
            .insert(profile.email().clone(), profile.id().clone());
        state.users.insert(profile.id().clone(), profile.clone());
        Ok(())
    }

    async fn remove(&self, id: &UserId) -> DirectoryRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .users
            .remove(id)
            .ok_or_else(|| DirectoryRepositoryError::UserNotFound(id.clone()))?;
        state.email_index.remove(removed.email());
        Ok(())
    }

    async fn find_by_id(&self, id: &UserId) -> DirectoryRepositoryResult<Option<UserProfile>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.users.get(id).cloned())
    }

    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> DirectoryRepositoryResult<Option<UserProfile>> {
        let state = self.state.read().map_err(lock_error)?;
        let profile = state
            .email_index
            .get(email)
            .and_then(|user_id| state.users.get(user_id))
            .cloned();
        Ok(profile)
    }
}
