//! In-memory repository for comment tests.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Comment, CommentId, TaskId},
    ports::{CommentRepository, TaskRepositoryError, TaskRepositoryResult},
};

/// Thread-safe in-memory comment repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryCommentRepository {
    state: Arc<RwLock<InMemoryCommentState>>,
}

#[derive(Debug, Default)]
struct InMemoryCommentState {
    comments: HashMap<CommentId, Comment>,
    task_index: HashMap<TaskId, Vec<CommentId>>,
}

impl InMemoryCommentRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl std::fmt::Display) -> TaskRepositoryError {
    TaskRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn store(&self, comment: &Comment) -> TaskRepositoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.comments.contains_key(&comment.id()) {
            return Err(TaskRepositoryError::DuplicateComment(comment.id()));
        }
        state
            .task_index
            .entry(comment.task_id())
            .or_default()
            .push(comment.id());
        state.comments.insert(comment.id(), comment.clone());
        Ok(())
    }

    async fn list_for_task(&self, task: TaskId) -> TaskRepositoryResult<Vec<Comment>> {
        let state = self.state.read().map_err(lock_error)?;
        let comments = state
            .task_index
            .get(&task)
            .map(|ids| {
                ids.iter()
                    .filter_map(|id| state.comments.get(id).cloned())
                    .collect()
            })
            .unwrap_or_default();
        Ok(comments)
    }
}
