//! Orchestration services for the project context.

mod lifecycle;

pub use lifecycle::{
    CreateProjectRequest, ProjectLifecycleError, ProjectLifecycleResult, ProjectLifecycleService,
    UpdateProjectRequest,
};
