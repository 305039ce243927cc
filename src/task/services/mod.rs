//! Orchestration services for the task context.

mod comments;
mod lifecycle;

pub use comments::{CommentError, CommentService};
pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    UpdateTaskRequest,
};
